/*!
Fish art: the ordered collection the fish factory picks from, plus a helper to
measure any multi-line ASCII block.

Notes:
- Every piece faces right; the fish mirrors it when swimming left.
- Width is the maximum character count across all lines (Unicode scalar count).
- Height is the number of lines returned by `.lines()`, so a trailing newline
  does not add a row.
- Leading and trailing blank lines of the raw constants are trimmed.

Example:
```text
><(((º>
```
*/

const FISH_TINY: &str = r#"><>"#;

const FISH_ARROW: &str = r#"><(((º>"#;

const FISH_FIN: &str = r#"
  ,\
>=('>
  '/
"#;

const FISH_ROUND: &str = r#"
  __
\/ o\
/\__/
"#;

const FISH_STRIPED: &str = r#"
    \
\ /--\
>=  (o>
/ \__/
    /
"#;

const FISH_BIG: &str = r#"
       \
     ...\..,
\  /'       \
 >=     (  ' >
/  \      / /
    `"'"'/''
"#;

const FISH_PUFFER: &str = r#"
   _/\_
 /( o  \
<  ))   >
 \(____/
"#;

const FISH_EEL: &str = r#"
 ___________
<(__________)o>
"#;

/// A fish art block with its measured size in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FishArt {
    pub art: &'static str,
    pub width: usize,
    pub height: usize,
}

/// Measure an ASCII art block as `(columns, rows)`. Guarantees at least 1x1.
pub fn measure_art(art: &str) -> (usize, usize) {
    let mut max_w = 0usize;
    let mut h = 0usize;
    for line in art.lines() {
        max_w = max_w.max(line.chars().count());
        h += 1;
    }
    (max_w.max(1), h.max(1))
}

/// The fish art collection, in a stable order.
pub fn fish_arts() -> Vec<FishArt> {
    [
        FISH_TINY,
        FISH_ARROW,
        FISH_FIN,
        FISH_ROUND,
        FISH_STRIPED,
        FISH_BIG,
        FISH_PUFFER,
        FISH_EEL,
    ]
    .into_iter()
    .map(|raw| {
        let art = raw.trim_matches('\n');
        let (width, height) = measure_art(art);
        FishArt { art, width, height }
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_single_line() {
        assert_eq!(measure_art(FISH_ARROW), (7, 1));
    }

    #[test]
    fn measure_ignores_trailing_newline() {
        assert_eq!(measure_art("(\n)\n(\n"), (1, 3));
        assert_eq!(measure_art(""), (1, 1));
    }

    #[test]
    fn arts_are_trimmed_and_non_empty() {
        let arts = fish_arts();
        assert_eq!(arts.len(), 8);
        for a in arts {
            assert!(!a.art.is_empty());
            assert!(!a.art.starts_with('\n') && !a.art.ends_with('\n'));
            assert!(a.width >= 1 && a.height >= 1);
        }
    }

    #[test]
    fn big_fish_is_multi_line() {
        let big = fish_arts()[5];
        assert_eq!(big.height, 6);
        assert_eq!(big.width, 14);
    }
}
