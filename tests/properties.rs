//! Property tests over generated databases and queries.

mod common;

use numdb::{Database, Props};
use proptest::prelude::*;

/// A generated source line: ranges, props and nested lines.
#[derive(Clone, Debug)]
struct GenLine {
    ranges: Vec<(String, String)>,
    props: Vec<(String, String)>,
    children: Vec<GenLine>,
}

fn render(lines: &[GenLine], depth: usize, out: &mut String) {
    for line in lines {
        out.push_str(&"  ".repeat(depth));
        let ranges: Vec<String> = line
            .ranges
            .iter()
            .map(|(low, high)| {
                if low == high {
                    low.clone()
                } else {
                    format!("{low}-{high}")
                }
            })
            .collect();
        out.push_str(&ranges.join(","));
        for (key, value) in &line.props {
            out.push_str(&format!(" {key}=\"{value}\""));
        }
        out.push('\n');
        render(&line.children, depth + 1, out);
    }
}

fn build(lines: &[GenLine]) -> Database {
    let mut text = String::new();
    render(lines, 0, &mut text);
    numdb::read_str(&text).expect("generated database parses")
}

fn arb_digits(len: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(proptest::char::range('0', '9'), len)
        .prop_map(|digits: Vec<char>| digits.into_iter().collect::<String>())
}

fn arb_range(len: usize) -> impl Strategy<Value = (String, String)> {
    (arb_digits(len), arb_digits(len)).prop_map(|(a, b)| if a <= b { (a, b) } else { (b, a) })
}

fn arb_ranges() -> impl Strategy<Value = Vec<(String, String)>> {
    (1usize..=3).prop_flat_map(|len| prop::collection::vec(arb_range(len), 1..3))
}

fn arb_props() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(
        (
            prop_oneof![Just("a".to_string()), Just("b".to_string()), Just("c".to_string())],
            "[a-z ]{0,4}",
        ),
        0..3,
    )
}

fn arb_line(depth: u32) -> BoxedStrategy<GenLine> {
    let children = if depth == 0 {
        Just(Vec::new()).boxed()
    } else {
        prop::collection::vec(arb_line(depth - 1), 0..3).boxed()
    };
    (arb_ranges(), arb_props(), children)
        .prop_map(|(ranges, props, children)| GenLine {
            ranges,
            props,
            children,
        })
        .boxed()
}

fn arb_database() -> impl Strategy<Value = Database> {
    prop::collection::vec(arb_line(2), 0..5).prop_map(|lines| build(&lines))
}

/// Databases whose top-level prefixes are distinct single digits.
fn arb_disjoint_database() -> impl Strategy<Value = Database> {
    let digits: Vec<char> = ('0'..='9').collect();
    (
        proptest::sample::subsequence(digits, 1..=10),
        prop::collection::vec(prop::collection::vec(arb_line(1), 0..3), 10),
    )
        .prop_map(|(prefixes, children)| {
            let lines: Vec<GenLine> = prefixes
                .into_iter()
                .zip(children)
                .map(|(digit, children)| GenLine {
                    ranges: vec![(digit.to_string(), digit.to_string())],
                    props: vec![("top".to_string(), digit.to_string())],
                    children,
                })
                .collect();
            build(&lines)
        })
}

proptest! {
    #[test]
    fn prop_parts_concatenate_to_query(db in arb_database(), number in "[0-9]{1,10}") {
        let joined: String = db.info(&number).into_iter().map(|p| p.digits).collect();
        prop_assert_eq!(joined, number);
    }

    #[test]
    fn prop_non_digit_queries_still_concatenate(db in arb_database(), number in "[0-9a-z/]{1,8}") {
        let joined: String = db.split(&number).concat();
        prop_assert_eq!(joined, number);
    }

    #[test]
    fn prop_multibyte_queries_still_concatenate(db in arb_database(), number in "\\PC{1,8}") {
        let joined: String = db.info(&number).into_iter().map(|p| p.digits).collect();
        prop_assert_eq!(joined, number);
    }

    #[test]
    fn prop_split_is_info_digits(db in arb_database(), number in "[0-9]{1,10}") {
        let digits: Vec<String> = db.info(&number).into_iter().map(|p| p.digits).collect();
        prop_assert_eq!(db.split(&number), digits);
    }

    #[test]
    fn prop_info_is_never_empty(db in arb_database(), number in "[0-9]{0,6}") {
        prop_assert!(!db.info(&number).is_empty());
    }

    #[test]
    fn prop_single_range_database(
        (low, high) in (1usize..=4).prop_flat_map(arb_range),
        value in "[a-z]{1,5}",
        number in "[0-9]{1,8}",
    ) {
        let db = numdb::read_str(&format!("{low}-{high} name=\"{value}\"\n")).unwrap();
        let first = db.info(&number).into_iter().next().unwrap();
        let k = low.len();

        if number.len() >= k && low.as_str() <= &number[..k] && &number[..k] <= high.as_str() {
            prop_assert_eq!(first.digits, &number[..k]);
            prop_assert_eq!(first.props.get("name"), Some(value.as_str()));
        } else {
            prop_assert_eq!(first.digits, number);
            prop_assert_eq!(first.props, Props::new());
        }
    }

    #[test]
    fn prop_writer_round_trip(db in arb_database()) {
        let reread = numdb::read_str(&db.to_string()).unwrap();
        prop_assert_eq!(reread, db);
    }

    #[test]
    fn prop_first_part_is_stable(db in arb_disjoint_database(), number in "[0-9]{1,10}") {
        let first = db.info(&number).into_iter().next().unwrap();
        let again = db.info(&first.digits).into_iter().next().unwrap();
        prop_assert_eq!(again, first);
    }

    #[test]
    fn prop_example_parts_concatenate(number in "[0-9]{1,12}") {
        let joined: String = common::example_db().split(&number).concat();
        prop_assert_eq!(joined, number);
    }
}
