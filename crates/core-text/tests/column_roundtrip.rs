//! Property tests for the character-column <-> render-column mappings.

use core_text::{Row, TAB_STOP};
use proptest::prelude::*;

fn arb_line() -> impl Strategy<Value = String> {
    // Printable ASCII mixed with tabs, the shapes the mapping must survive.
    proptest::collection::vec(
        prop_oneof![
            4 => proptest::char::range(' ', '~'),
            1 => Just('\t'),
        ],
        0..64,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn render_col_inverts_char_col(line in arb_line()) {
        let row = Row::new(0, line);
        for cx in 0..=row.char_len() {
            let rx = row.char_col_to_render_col(cx);
            prop_assert_eq!(row.render_col_to_char_col(rx), cx);
        }
    }

    #[test]
    fn char_col_is_monotonic(line in arb_line()) {
        let row = Row::new(0, line);
        let mut prev = 0;
        for cx in 0..=row.char_len() {
            let rx = row.char_col_to_render_col(cx);
            prop_assert!(cx == 0 || rx > prev);
            prev = rx;
        }
    }

    #[test]
    fn render_length_counts_tab_cells(line in arb_line()) {
        let row = Row::new(0, line);
        prop_assert_eq!(row.char_col_to_render_col(row.char_len()), row.render_len());
        // Every tab lands the next cell on a stop boundary.
        let mut rx = 0;
        for c in row.raw().chars() {
            if c == '\t' {
                rx += TAB_STOP - (rx % TAB_STOP);
                prop_assert_eq!(rx % TAB_STOP, 0);
            } else {
                rx += 1;
            }
        }
    }
}
