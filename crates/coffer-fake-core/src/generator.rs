//! Password generation.
//!
//! Every enabled character class contributes at least one character, even
//! when no explicit minimum is set; explicit minimums raise that floor.
//! Infeasible requests are rejected before any randomness is drawn.

use coffer_proto::PasswordGeneratorRequest;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::CoreError;

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const LOWERCASE_SAFE: &[u8] = b"abcdefghijkmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const UPPERCASE_SAFE: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
const NUMBERS: &[u8] = b"0123456789";
const NUMBERS_SAFE: &[u8] = b"23456789";
const SPECIAL: &[u8] = b"!@#$%^&*";

/// One enabled character class and how many characters it must contribute.
struct CharClass {
    set: &'static [u8],
    minimum: usize,
}

/// Generates a password honoring the request's constraints.
pub(crate) fn generate(request: &PasswordGeneratorRequest) -> Result<String, CoreError> {
    if request.length == 0 {
        return Err(CoreError::ZeroLength);
    }
    let length = usize::from(request.length);

    let mut classes = Vec::new();
    let mut add_class = |enabled: bool,
                         name: &'static str,
                         all: &'static [u8],
                         safe: &'static [u8],
                         minimum: Option<u8>|
     -> Result<(), CoreError> {
        if enabled {
            classes.push(CharClass {
                set: if request.avoid_ambiguous { safe } else { all },
                minimum: usize::from(minimum.unwrap_or(0)).max(1),
            });
        } else if minimum.unwrap_or(0) > 0 {
            return Err(CoreError::MinimumForDisabledClass { class: name });
        }
        Ok(())
    };

    add_class(
        request.lowercase,
        "lowercase",
        LOWERCASE,
        LOWERCASE_SAFE,
        request.min_lowercase,
    )?;
    add_class(
        request.uppercase,
        "uppercase",
        UPPERCASE,
        UPPERCASE_SAFE,
        request.min_uppercase,
    )?;
    add_class(
        request.numbers,
        "numbers",
        NUMBERS,
        NUMBERS_SAFE,
        request.min_number,
    )?;
    add_class(
        request.special,
        "special",
        SPECIAL,
        SPECIAL,
        request.min_special,
    )?;

    if classes.is_empty() {
        return Err(CoreError::NoCharacterClasses);
    }
    let required: usize = classes.iter().map(|class| class.minimum).sum();
    if required > length {
        return Err(CoreError::InfeasibleMinimums);
    }

    let mut rng = rand::thread_rng();
    let mut password = Vec::with_capacity(length);

    for class in &classes {
        for _ in 0..class.minimum {
            password.push(class.set[rng.gen_range(0..class.set.len())]);
        }
    }

    let pool: Vec<u8> = classes
        .iter()
        .flat_map(|class| class.set.iter().copied())
        .collect();
    while password.len() < length {
        password.push(pool[rng.gen_range(0..pool.len())]);
    }

    password.shuffle(&mut rng);
    Ok(String::from_utf8_lossy(&password).into_owned())
}
