//! Property-based tests for clause compilation using proptest.

use proptest::prelude::*;
use tdoo_query::{Op, QueryBuilder, QueryError, Scalar, Value};

// ============================================================================
// Test helpers
// ============================================================================

const SCALAR_OPS: [Op; 12] = [
    Op::Eq,
    Op::NotEq,
    Op::Ge,
    Op::NotGe,
    Op::Le,
    Op::NotLe,
    Op::Gt,
    Op::NotGt,
    Op::Lt,
    Op::NotLt,
    Op::Like,
    Op::NotLike,
];

#[derive(Debug, Clone)]
enum Arg {
    Int(i64),
    Text(String),
    Flag(bool),
    Items(Vec<i64>),
}

#[derive(Debug, Clone)]
struct Spec {
    or: bool,
    column: String,
    op: Op,
    arg: Arg,
}

impl Spec {
    fn expected_args(&self) -> Vec<String> {
        match &self.arg {
            Arg::Int(n) => vec![n.to_string()],
            Arg::Text(s) => vec![s.clone()],
            Arg::Flag(b) => vec![if *b { "1" } else { "0" }.to_string()],
            Arg::Items(items) => items.iter().map(|n| n.to_string()).collect(),
        }
    }

    fn value(&self) -> Value {
        match &self.arg {
            Arg::Int(n) => Value::from(*n),
            Arg::Text(s) => Value::from(s.as_str()),
            Arg::Flag(b) => Value::from(*b),
            Arg::Items(items) => Value::from(items.clone()),
        }
    }

    fn apply(&self, qb: QueryBuilder) -> QueryBuilder {
        let value = self.value();
        let next = if self.or {
            qb.or(&self.column, self.op, value)
        } else {
            qb.and(&self.column, self.op, value)
        };
        next.unwrap()
    }
}

fn scalar_arg() -> impl Strategy<Value = Arg> {
    prop_oneof![
        any::<i64>().prop_map(Arg::Int),
        "[a-z' %]{0,12}".prop_map(Arg::Text),
        any::<bool>().prop_map(Arg::Flag),
    ]
}

fn spec_strategy() -> impl Strategy<Value = Spec> {
    let scalar = (
        any::<bool>(),
        "[a-z_]{1,8}",
        prop::sample::select(SCALAR_OPS.to_vec()),
        scalar_arg(),
    )
        .prop_map(|(or, column, op, arg)| Spec {
            or,
            column,
            op,
            arg,
        });
    let membership = (
        any::<bool>(),
        "[a-z_]{1,8}",
        prop::sample::select(vec![Op::In, Op::NotIn]),
        prop::collection::vec(any::<i64>(), 0..6),
    )
        .prop_map(|(or, column, op, items)| Spec {
            or,
            column,
            op,
            arg: Arg::Items(items),
        });
    prop_oneof![3 => scalar, 1 => membership]
}

fn build(specs: &[Spec]) -> QueryBuilder {
    specs
        .iter()
        .fold(QueryBuilder::new(), |qb, spec| spec.apply(qb))
}

fn expected_args(specs: &[Spec]) -> Vec<String> {
    specs.iter().flat_map(Spec::expected_args).collect()
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Every bound argument has exactly one placeholder.
    #[test]
    fn placeholders_match_arguments(specs in prop::collection::vec(spec_strategy(), 0..12)) {
        let compiled = build(&specs).compile();
        let placeholders = compiled.selection.matches('?').count();
        prop_assert_eq!(placeholders, compiled.arguments.len());
    }

    /// Arguments appear in the order their conditions were added.
    #[test]
    fn arguments_follow_insertion_order(specs in prop::collection::vec(spec_strategy(), 0..12)) {
        let qb = build(&specs);
        prop_assert_eq!(qb.selection_arguments(), expected_args(&specs));
    }

    /// Compiling never changes the builder, so repeated compiles agree.
    #[test]
    fn compile_is_idempotent(specs in prop::collection::vec(spec_strategy(), 0..12)) {
        let qb = build(&specs);
        let before = qb.clone();
        let first = qb.compile();
        let second = qb.compile();
        prop_assert_eq!(first, second);
        prop_assert_eq!(qb, before);
    }

    /// A membership list of n items renders n comma-separated placeholders.
    #[test]
    fn in_list_renders_one_placeholder_per_item(
        items in prop::collection::vec(any::<i64>(), 0..20),
        negated in any::<bool>(),
    ) {
        let op = if negated { Op::NotIn } else { Op::In };
        let qb = QueryBuilder::new().and("_id", op, items.clone()).unwrap();

        let marks = vec!["?"; items.len()].join(",");
        let prefix = if negated { "NOT " } else { "" };
        prop_assert_eq!(qb.selection(), format!("{prefix}_id IN({marks})"));
        prop_assert_eq!(qb.selection_arguments().len(), items.len());
    }

    /// Negated operators differ from their base only by a leading NOT.
    #[test]
    fn negation_is_textual_prefix(
        op in prop::sample::select(SCALAR_OPS.to_vec()),
        n in any::<i64>(),
    ) {
        let base = QueryBuilder::new().and("x", op.base(), n).unwrap();
        let negated = QueryBuilder::new().and("x", op.base().negate(), n).unwrap();
        prop_assert_eq!(negated.selection(), format!("NOT {}", base.selection()));
        prop_assert_eq!(negated.selection_arguments(), base.selection_arguments());
    }

    /// A group contributes its own arguments in place, wrapped in parentheses.
    #[test]
    fn group_arguments_are_spliced_in_place(
        outer in prop::collection::vec(spec_strategy(), 1..5),
        inner in prop::collection::vec(spec_strategy(), 1..5),
        tail in prop::collection::vec(spec_strategy(), 0..5),
    ) {
        let group = build(&inner);
        let group_sql = group.selection();
        let qb = tail.iter().fold(build(&outer).and_group(group), |qb, s| s.apply(qb));

        let mut expected = expected_args(&outer);
        expected.extend(expected_args(&inner));
        expected.extend(expected_args(&tail));
        prop_assert_eq!(qb.selection_arguments(), expected);
        let wrapped = format!("({group_sql})");
        prop_assert!(qb.selection().contains(&wrapped));
    }

    /// Every integer keeps its decimal form as an argument.
    #[test]
    fn integers_canonicalize_to_decimal(n in any::<i64>()) {
        prop_assert_eq!(Scalar::Int(n).canonical(), n.to_string());
    }

    /// Float arguments keep a decimal point and parse back to the same value.
    #[test]
    fn floats_roundtrip_through_canonical_form(
        x in any::<f64>().prop_filter("finite", |x| x.is_finite()),
    ) {
        let text = Scalar::Float(x).canonical();
        let mantissa = text.split('e').next().unwrap_or_default();
        prop_assert!(mantissa.contains('.'), "no decimal point: {}", text);
        let parsed: f64 = text.parse().unwrap();
        prop_assert_eq!(parsed, x);
    }

    /// Non-finite floats never reach the argument list.
    #[test]
    fn non_finite_floats_are_rejected(
        x in prop::sample::select(vec![f64::NAN, f64::INFINITY, f64::NEG_INFINITY]),
    ) {
        let err = QueryBuilder::new().and("progress", Op::Eq, x).unwrap_err();
        prop_assert!(matches!(err, QueryError::InvalidValue { .. }), "expected InvalidValue, got {:?}", err);
    }
}
