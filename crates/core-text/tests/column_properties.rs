//! Property-based tests for the raw-to-render column mapping.

use core_text::{Row, TAB_STOP, TextBuffer};
use proptest::prelude::*;

fn line_bytes() -> impl Strategy<Value = Vec<u8>> {
    // Printable ASCII mixed with tabs, the cases the mapping cares about.
    proptest::collection::vec(
        prop_oneof![3 => 0x20u8..0x7f, 1 => Just(b'\t')],
        0..64,
    )
}

proptest! {
    // The mapping never moves the cursor backwards as cx grows.
    #[test]
    fn cx_to_rx_is_monotonic(bytes in line_bytes()) {
        let row = Row::from_bytes(&bytes, TAB_STOP);
        let mut prev = 0;
        for cx in 0..=row.len() {
            let rx = row.cx_to_rx(cx, TAB_STOP);
            prop_assert!(rx >= prev, "rx regressed at cx={cx}: {rx} < {prev}");
            prev = rx;
        }
    }

    // Without tabs, raw and render columns coincide exactly.
    #[test]
    fn cx_to_rx_identity_when_tab_free(bytes in proptest::collection::vec(0x20u8..0x7f, 0..64)) {
        let row = Row::from_bytes(&bytes, TAB_STOP);
        for cx in 0..=row.len() {
            prop_assert_eq!(row.cx_to_rx(cx, TAB_STOP), cx);
        }
    }

    // The full-width mapping lands exactly on the render length, so the
    // render image and the column math can never disagree.
    #[test]
    fn full_width_matches_render_length(bytes in line_bytes()) {
        let row = Row::from_bytes(&bytes, TAB_STOP);
        prop_assert_eq!(row.cx_to_rx(row.len(), TAB_STOP), row.render().len());
    }

    // Arbitrary insertion sequences keep render equal to a from-scratch
    // expansion of the final content.
    #[test]
    fn render_never_stale_after_inserts(
        seed in line_bytes(),
        inserts in proptest::collection::vec((any::<usize>(), prop_oneof![3 => 0x20u8..0x7f, 1 => Just(b'\t')]), 0..16),
    ) {
        let mut buffer = TextBuffer::new(TAB_STOP);
        buffer.append_row(&seed);
        for (at, b) in inserts {
            buffer.insert_byte(0, at % (seed.len() + 8), b);
        }
        let row = buffer.row(0).unwrap();
        let expected = Row::from_bytes(row.content(), TAB_STOP);
        prop_assert_eq!(row.render(), expected.render());
    }
}
