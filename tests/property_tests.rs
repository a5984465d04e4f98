use jexpr::{ArrayAccess, EvalContext, Expression, Value, ast::resolve_index};
use proptest::prelude::*;

fn int_array(values: &[i64]) -> Value {
    Value::Array(values.iter().copied().map(Value::Integer).collect())
}

fn array_and_index() -> impl Strategy<Value = (Vec<i64>, i64)> {
    prop::collection::vec(any::<i64>(), 1..20).prop_flat_map(|values| {
        let n = values.len() as i64;
        (Just(values), -n..n)
    })
}

fn array_and_range() -> impl Strategy<Value = (Vec<i64>, i64, i64)> {
    prop::collection::vec(any::<i64>(), 1..20).prop_flat_map(|values| {
        let n = values.len() as i64;
        (Just(values), -n..n, -n..n)
    })
}

proptest! {
    #[test]
    fn single_index_matches_resolved_get((values, index) in array_and_index()) {
        let doc = int_array(&values);
        let expected = doc.array_get(resolve_index(index, values.len())).unwrap().cloned();
        let result = ArrayAccess::index(index).evaluate(&doc, &EvalContext::new()).unwrap();
        prop_assert_eq!(Some(result.into_owned()), expected);
    }

    #[test]
    fn evaluate_leaves_input_untouched((values, start, end) in array_and_range()) {
        let doc = int_array(&values);
        let _ = ArrayAccess::range(start, end).evaluate(&doc, &EvalContext::new()).unwrap();
        prop_assert_eq!(doc, int_array(&values));
    }

    #[test]
    fn reversed_range_is_reversed_selection((values, start, end) in array_and_range()) {
        let doc = int_array(&values);
        let ctx = EvalContext::new();
        let n = values.len();
        prop_assume!(resolve_index(start, n) != resolve_index(end, n));
        prop_assume!(!ArrayAccess::range(start, end).is_selecting_all());
        prop_assume!(!ArrayAccess::range(end, start).is_selecting_all());

        let forward = ArrayAccess::range(start, end).evaluate(&doc, &ctx).unwrap().into_owned();
        let backward = ArrayAccess::range(end, start).evaluate(&doc, &ctx).unwrap().into_owned();
        let mut reversed = backward.as_array().unwrap().clone();
        reversed.reverse();
        prop_assert_eq!(forward.as_array().unwrap(), &reversed);
    }

    #[test]
    fn set_then_evaluate_single_index((values, index) in array_and_index(), new in any::<i64>()) {
        let ctx = EvalContext::new();
        let access = ArrayAccess::index(index);
        let mut doc = int_array(&values);
        access.set(&mut doc, Value::Integer(new), &ctx).unwrap();
        prop_assert_eq!(access.evaluate(&doc, &ctx).unwrap().into_owned(), Value::Integer(new));
    }
}
