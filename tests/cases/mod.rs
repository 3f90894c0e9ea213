/// Validate a one-field record holding `value` under `rule`.
///
/// The optional `sibling` field sits before `value` and is reachable from
/// the rule as `(sibling)$`. With `collect_all` on, `expected` is either
/// `Ok(())` or `Err` with the rendered error text.
macro_rules! validate_case {
    (
        $name:ident,
        rule: $rule:tt,
        value: $ty:ty = $value:expr,
        $(sibling: $sibling_ty:ty = $sibling:expr,)?
        expected: $expected:expr $(,)?
    ) => {
        #[test]
        fn $name() {
            #[derive(fieldcheck::Inspect)]
            struct Case {
                $(sibling: $sibling_ty,)?
                #[tag(vd = $rule)]
                value: $ty,
            }

            let case = Case {
                $(sibling: $sibling,)?
                value: $value,
            };
            let expected: Result<(), &str> = $expected;
            pretty_assertions::assert_eq!(
                fieldcheck::validate(&case, true).map_err(|err| err.to_string()),
                expected.map_err(str::to_string),
            );
        }
    };
}
