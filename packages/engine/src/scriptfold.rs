//! Script folding: reduce text to a script-, case- and spacing-invariant form.
//!
//! Two inputs that a reader would consider "the same words" in a different
//! script, case, accent or spacing must fold to the identical string. The
//! output alphabet is lowercase ASCII letters, digits and single spaces,
//! which makes folded strings safe as comparison keys.
//!
//! Folding is idempotent: `fold(fold(x)) == fold(x)`.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Transliterate one Serbian-Cyrillic letter to its Latin spelling.
///
/// Digraph letters map to two Latin letters (љ → "lj"). The produced Latin
/// letters may still carry diacritics (ж → "ž"); those are handled by
/// [`fold_latin`] in the same pass. Characters outside the alphabet return
/// `None` and fall through to the NFD safety net.
fn transliterate(c: char) -> Option<&'static str> {
    Some(match c {
        'а' | 'А' => "a",
        'б' | 'Б' => "b",
        'в' | 'В' => "v",
        'г' | 'Г' => "g",
        'д' | 'Д' => "d",
        'ђ' | 'Ђ' => "đ",
        'е' | 'Е' => "e",
        'ж' | 'Ж' => "ž",
        'з' | 'З' => "z",
        'и' | 'И' => "i",
        'ј' | 'Ј' => "j",
        'к' | 'К' => "k",
        'л' | 'Л' => "l",
        'љ' | 'Љ' => "lj",
        'м' | 'М' => "m",
        'н' | 'Н' => "n",
        'њ' | 'Њ' => "nj",
        'о' | 'О' => "o",
        'п' | 'П' => "p",
        'р' | 'Р' => "r",
        'с' | 'С' => "s",
        'т' | 'Т' => "t",
        'ћ' | 'Ћ' => "ć",
        'у' | 'У' => "u",
        'ф' | 'Ф' => "f",
        'х' | 'Х' => "h",
        'ц' | 'Ц' => "c",
        'ч' | 'Ч' => "č",
        'џ' | 'Џ' => "dž",
        'ш' | 'Ш' => "š",
        _ => return None,
    })
}

/// Fold a Latin letter with a diacritic to its bare ASCII spelling.
///
/// Covers the letters of the Gaj alphabet explicitly; đ folds to the
/// conventional "dj" digraph (not a bare "d") so that "Đorđe" and
/// "Djordje" compare equal.
fn fold_latin(c: char) -> Option<&'static str> {
    Some(match c {
        'č' | 'Č' | 'ć' | 'Ć' => "c",
        'đ' | 'Đ' => "dj",
        'š' | 'Š' => "s",
        'ž' | 'Ž' => "z",
        _ => return None,
    })
}

/// Fold a string to its canonical comparison form.
///
/// Pipeline: transliterate Cyrillic letters, fold tabled Latin diacritics,
/// strip any remaining combining mark via NFD decomposition, lowercase,
/// collapse every non-alphanumeric run to a single space, trim.
///
/// # Examples
/// ```
/// use zakonik_engine::scriptfold::fold;
///
/// assert_eq!(fold("Žalba"), "zalba");
/// assert_eq!(fold("жалба"), "zalba");
/// assert_eq!(fold("  Zakon -- o,radu  "), "zakon o radu");
/// assert_eq!(fold(""), "");
/// ```
#[must_use]
pub fn fold(input: &str) -> String {
    let mut latin = String::with_capacity(input.len());
    for c in input.chars() {
        match transliterate(c) {
            Some(tr) => {
                for t in tr.chars() {
                    push_folded(&mut latin, t);
                }
            }
            None => push_folded(&mut latin, c),
        }
    }

    let mut out = String::with_capacity(latin.len());
    let mut pending_space = false;
    let stripped = latin.nfd().filter(|c| !is_combining_mark(*c));
    for c in stripped.flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        } else {
            pending_space = true;
        }
    }
    out
}

fn push_folded(dst: &mut String, c: char) {
    match fold_latin(c) {
        Some(folded) => dst.push_str(folded),
        None => dst.push(c),
    }
}
