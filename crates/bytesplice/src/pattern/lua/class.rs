// Character class matching for engine patterns
// Handles %a, %d, %l, %u, %w, %s, %p, %c, %g, %x, %z and their uppercase inverses
// Also handles [set] matching. Everything is a byte; classes are ASCII.

use crate::pattern::whitespace::is_space;

/// Check if a byte matches a class letter.
/// `cl` is the class letter (lowercase): 'a','c','d','g','l','p','s','u','w','x','z'
#[inline(always)]
pub fn match_class(c: u8, cl: u8) -> bool {
    match cl {
        b'a' => c.is_ascii_alphabetic(),
        b'c' => c.is_ascii_control(),
        b'd' => c.is_ascii_digit(),
        b'g' => c.is_ascii_graphic(),
        b'l' => c.is_ascii_lowercase(),
        b'p' => c.is_ascii_punctuation(),
        b's' => is_space(c),
        b'u' => c.is_ascii_uppercase(),
        b'w' => c.is_ascii_alphanumeric(),
        b'x' => c.is_ascii_hexdigit(),
        b'z' => c == 0,
        _ => c == cl, // not a class letter, match literally
    }
}

#[inline(always)]
fn is_class_letter(cl: u8) -> bool {
    matches!(
        cl.to_ascii_lowercase(),
        b'a' | b'c' | b'd' | b'g' | b'l' | b'p' | b's' | b'u' | b'w' | b'x' | b'z'
    )
}

/// `%X` with an uppercase class letter matches the complement.
#[inline(always)]
fn match_escape(c: u8, cl: u8) -> bool {
    if cl.is_ascii_uppercase() && is_class_letter(cl) {
        !match_class(c, cl.to_ascii_lowercase())
    } else {
        match_class(c, cl)
    }
}

/// Match a single byte against the single pattern element starting at `pat[pp]`.
///
/// `.` is any byte, `%a`-style escapes are classes (uppercase inverts),
/// `%` before a non-class byte quotes it, `[...]` is a set, anything else
/// matches itself.
pub fn singlematch(c: u8, pat: &[u8], pp: usize) -> bool {
    match pat[pp] {
        b'.' => true,
        b'%' => match_escape(c, pat[pp + 1]),
        b'[' => matchset(c, pat, pp),
        lit => c == lit,
    }
}

/// Index just past the element at `pp`; a trailing `* + - ?` is left in place.
#[inline]
pub fn element_end(pat: &[u8], pp: usize) -> usize {
    match pat[pp] {
        b'%' => pp + 2,
        b'[' => {
            let mut i = pp + 1;
            if i < pat.len() && pat[i] == b'^' {
                i += 1;
            }
            // ']' right after '[' (or '[^') is a literal member
            if i < pat.len() && pat[i] == b']' {
                i += 1;
            }
            while i < pat.len() && pat[i] != b']' {
                if pat[i] == b'%' && i + 1 < pat.len() {
                    i += 1;
                }
                i += 1;
            }
            i + 1
        }
        _ => pp + 1,
    }
}

/// Match byte `c` against a `[set]` starting at `pat[pp]` (pp points to `[`).
fn matchset(c: u8, pat: &[u8], pp: usize) -> bool {
    let mut i = pp + 1;
    let negated = i < pat.len() && pat[i] == b'^';
    if negated {
        i += 1;
    }

    let mut matched = false;

    if i < pat.len() && pat[i] == b']' {
        matched |= c == b']';
        i += 1;
    }

    while i < pat.len() && pat[i] != b']' {
        if pat[i] == b'%' && i + 1 < pat.len() {
            matched |= match_escape(c, pat[i + 1]);
            i += 2;
        } else if i + 2 < pat.len() && pat[i + 1] == b'-' && pat[i + 2] != b']' {
            matched |= pat[i] <= c && c <= pat[i + 2];
            i += 3;
        } else {
            matched |= c == pat[i];
            i += 1;
        }
    }

    matched != negated
}
