//! Spreadsheet column letters (`A`, `B`, ..., `Z`, `AA`, ...).

/// 0-based column index to its letter name.
///
/// ```
/// use sheetmap::column::index_to_letters;
/// assert_eq!(index_to_letters(0), "A");
/// assert_eq!(index_to_letters(25), "Z");
/// assert_eq!(index_to_letters(26), "AA");
/// assert_eq!(index_to_letters(701), "ZZ");
/// assert_eq!(index_to_letters(702), "AAA");
/// ```
pub fn index_to_letters(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index;
    loop {
        letters.push(b'A' + (n % 26) as u8);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    letters.iter().rev().map(|&b| char::from(b)).collect()
}

/// Letter name to 0-based column index. Case-insensitive; `None` for empty,
/// non-alphabetic or overflowing input.
pub fn letters_to_index(letters: &str) -> Option<usize> {
    let mut index: Option<usize> = None;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as usize;
        index = Some(match index {
            None => digit,
            Some(prev) => prev.checked_add(1)?.checked_mul(26)?.checked_add(digit)?,
        });
    }
    index
}

/// A1-style reference for a 0-based column and a 1-based row.
pub fn cell_ref(column: usize, row: usize) -> String {
    format!("{}{row}", index_to_letters(column))
}
