#[macro_use]
mod cases;

validate_case!(
    custom_message,
    rule: "@:$!=nil;msg:'value is required'",
    value: Option<String> = None,
    expected: Err("value is required"),
);

validate_case!(
    custom_message_only_on_failure,
    rule: "@:len($)>0;msg:'value is required'",
    value: String = "x".to_string(),
    expected: Ok(()),
);

validate_case!(
    custom_message_overrides_predicate,
    rule: "@:email($);msg:'bad address'",
    value: String = "nope".to_string(),
    expected: Err("bad address"),
);

validate_case!(
    formatted_message,
    rule: "@:len($)<=3;msg:sprintf('%s is %d bytes long',$,len($))",
    value: String = "abcdef".to_string(),
    expected: Err("abcdef is 6 bytes long"),
);

validate_case!(
    message_with_sibling,
    rule: "@:$>=(sibling)$;msg:sprintf('must be at least %v',(sibling)$)",
    value: i64 = 1,
    sibling: i64 = 3,
    expected: Err("must be at least 3"),
);

validate_case!(
    last_failed_predicate_wins,
    rule: "email($) || in($,'admin')",
    value: String = "root".to_string(),
    expected: Err("[admin] range exceeded"),
);

validate_case!(
    passing_predicate_leaves_default,
    rule: "email($) && len($)>100",
    value: String = "a@b.co".to_string(),
    expected: Err("invalid parameter: value"),
);

validate_case!(
    evaluation_error_uses_default,
    rule: "len($)>0",
    value: i64 = 3,
    expected: Err("invalid parameter: value"),
);

validate_case!(
    escaped_quotes_in_message,
    rule: "@:$>0;msg:'it\\'s \"wrong\"'",
    value: i64 = 0,
    expected: Err("it's \"wrong\""),
);

validate_case!(
    negated_predicate_does_not_leak_message,
    rule: "!in($,'root','admin') && len($)>=3",
    value: String = "bo".to_string(),
    expected: Err("invalid parameter: value"),
);

validate_case!(
    negated_predicate_rejects,
    rule: "!in($,'root','admin') && len($)>=3",
    value: String = "root".to_string(),
    expected: Err("invalid parameter: value"),
);

validate_case!(
    negated_predicate_passes,
    rule: "!in($,'root','admin') && len($)>=3",
    value: String = "bob".to_string(),
    expected: Ok(()),
);
