use std::collections::HashSet;

use crate::{
    alphabet::{Alphabet, DIGITS8, LETTERS48},
    error::Error,
    steerable::SteerableCodec,
};

#[test]
fn codes_have_the_configured_shape() {
    let codec = SteerableCodec::new(4, 10).unwrap();
    for _ in 0..200 {
        let code = codec.get_code();
        assert_eq!(code.len(), 10);
        assert_eq!(
            code.bytes().filter(u8::is_ascii_digit).count(),
            4,
            "code {code:?}"
        );
        for byte in code.bytes() {
            assert!(
                DIGITS8.as_bytes().contains(&byte) || LETTERS48.as_bytes().contains(&byte),
                "foreign byte {byte} in {code:?}"
            );
        }
        assert!(codec.verify(&code), "code {code:?}");
    }
}

#[test]
fn every_minted_code_verifies_across_geometries() {
    for (digit_count, code_length) in [(2, 8), (4, 10), (5, 12), (1, 6)] {
        let codec = SteerableCodec::new(digit_count, code_length).unwrap();
        for _ in 0..100 {
            let code = codec.get_code();
            assert_eq!(code.len(), code_length);
            assert_eq!(
                code.bytes().filter(u8::is_ascii_digit).count(),
                digit_count
            );
            assert!(codec.verify(&code));
        }
    }
}

#[test]
fn digit_positions_are_actually_random() {
    let codec = SteerableCodec::new(4, 10).unwrap();
    let masks: HashSet<Vec<usize>> = (0..100)
        .map(|_| {
            codec
                .get_code()
                .bytes()
                .enumerate()
                .filter(|(_, byte)| byte.is_ascii_digit())
                .map(|(position, _)| position)
                .collect()
        })
        .collect();
    // 210 possible masks; 100 draws landing on one would be broken.
    assert!(masks.len() > 1);
}

#[test]
fn wrong_length_fails() {
    let codec = SteerableCodec::new(4, 10).unwrap();
    let code = codec.get_code();
    assert!(!codec.verify(&code[1..]));
    assert!(!codec.verify(&format!("{code}A")));
    assert!(!codec.verify(""));
}

#[test]
fn tampered_letter_fails() {
    let letters = Alphabet::new(LETTERS48).unwrap();
    let codec = SteerableCodec::new(4, 10).unwrap();
    for _ in 0..50 {
        let mut bytes = codec.get_code().into_bytes();
        // The lowest letter position carries place value one: nudging it
        // shifts the decoded mask by less than 2^10, always visibly.
        let position = bytes
            .iter()
            .position(|byte| !byte.is_ascii_digit())
            .unwrap();
        let index = letters.index_of(bytes[position]).unwrap() as usize;
        bytes[position] = letters.symbol((index + 1) % letters.len());
        let tampered = String::from_utf8(bytes).unwrap();
        assert!(!codec.verify(&tampered), "tampered {tampered:?}");
    }
}

#[test]
fn foreign_characters_fail() {
    let codec = SteerableCodec::new(4, 10).unwrap();
    let mut bytes = codec.get_code().into_bytes();
    let position = bytes
        .iter()
        .position(|byte| !byte.is_ascii_digit())
        .unwrap();
    // 'l' is excluded from the letter table.
    bytes[position] = b'l';
    assert!(!codec.verify(&String::from_utf8(bytes).unwrap()));
}

#[test]
fn degenerate_geometries_fail_construction() {
    // No letter slots at all.
    assert!(matches!(
        SteerableCodec::new(10, 10).unwrap_err(),
        Error::DegeneratePattern { .. }
    ));
    assert!(matches!(
        SteerableCodec::new(11, 10).unwrap_err(),
        Error::DegeneratePattern { .. }
    ));
    // One letter slot cannot carry a 10-bit mask.
    assert!(matches!(
        SteerableCodec::new(9, 10).unwrap_err(),
        Error::DegeneratePattern { .. }
    ));
    // Mask wider than the word.
    assert!(matches!(
        SteerableCodec::new(4, 64).unwrap_err(),
        Error::DegeneratePattern { .. }
    ));
}

#[test]
fn misclassified_tables_fail_construction() {
    let err = SteerableCodec::with_alphabets(
        Alphabet::new("23A").unwrap(),
        Alphabet::new(LETTERS48).unwrap(),
        2,
        8,
        crate::ThreadRandom,
    )
    .unwrap_err();
    assert_eq!(
        err,
        Error::SymbolClassMismatch {
            symbol: 'A',
            expected: "digit"
        }
    );

    let err = SteerableCodec::with_alphabets(
        Alphabet::new(DIGITS8).unwrap(),
        Alphabet::new("abc7").unwrap(),
        2,
        8,
        crate::ThreadRandom,
    )
    .unwrap_err();
    assert_eq!(
        err,
        Error::SymbolClassMismatch {
            symbol: '7',
            expected: "letter"
        }
    );
}
