use pretty_assertions::assert_eq;

use formdown_core::{parse, parse_with, Field, FormPreprocessor, SpecificField};

const TEXT: &str = "
Welcome to the form tester

name* = ___[30]
_edad = ___
e-mail* = @
really annoying 323 name = ...

[section:user]
name* = ___

[section]
blip* = @

[collapse]
This is collapsible
[endcollapse]

[collapse:]
This is colon collapsible
[endcollapse]

[collapse:named]
This is a named collapsible
[endcollapse]

[section:other_user]
[collapse:other_named]
This is a named collapsible
[endcollapse]
";

const REWRITTEN: &str = "
Welcome to the form tester

{{ form.name }}
{{ form.edad }}
{{ form.e_mail }}
{{ form.really_annoying_323_name }}

{{ form.user_name }}

{{ form.blip }}

<div id=\"accordion-0\">
This is collapsible
</div>

<div id=\"accordion-1\">
This is colon collapsible
</div>

<div id=\"accordion-named\">
This is a named collapsible
</div>

<div id=\"accordion-other_user_other_named\">
This is a named collapsible
</div>
";

fn field(original_label: &str, required: bool, specific: SpecificField) -> Field {
    Field {
        original_label: original_label.to_string(),
        required,
        specific,
    }
}

#[test]
fn full_document() {
    let (rewritten, definition) = parse(TEXT).unwrap();
    assert_eq!(rewritten, REWRITTEN);

    let expected: Vec<(&str, Field)> = vec![
        (
            "name",
            field("name", true, SpecificField::String { length: Some(30) }),
        ),
        (
            "edad",
            field("_edad", false, SpecificField::String { length: None }),
        ),
        ("e_mail", field("e-mail", true, SpecificField::Email)),
        (
            "really_annoying_323_name",
            field(
                "really annoying 323 name",
                false,
                SpecificField::File {
                    allowed: None,
                    description: None,
                },
            ),
        ),
        (
            "user_name",
            field("name", true, SpecificField::String { length: None }),
        ),
        ("blip", field("blip", true, SpecificField::Email)),
    ];

    let got: Vec<(&str, &Field)> = definition.iter().map(|(k, v)| (k.as_str(), v)).collect();
    let want: Vec<(&str, &Field)> = expected.iter().map(|(k, v)| (*k, v)).collect();
    assert_eq!(got, want);

    let hidden = &definition["edad"];
    assert!(hidden.is_label_hidden());
    assert_eq!(hidden.label(), "edad");
    assert_eq!(hidden.original_label, "_edad");
}

#[test]
fn duplicate_declaration_fails() {
    let text = "
Welcome to the form tester

name* = ___[30]

name* = ___[30]
";
    let err = parse(text).unwrap_err();
    assert_eq!(
        err.to_string(),
        "duplicate variable name found in form: name"
    );
}

#[test]
fn same_label_in_distinct_sections_succeeds() {
    let text = "[section:a]\nname = ___\n[section:b]\nname = ___";
    let (_, definition) = parse(text).unwrap();
    let keys: Vec<&str> = definition.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, vec!["a_name", "b_name"]);
}

#[test]
fn definition_preserves_declaration_order() {
    let text = "zeta = ___\nalpha = @\nmiddle = ###\n";
    let (_, definition) = parse(text).unwrap();
    let keys: Vec<&str> = definition.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, vec!["zeta", "alpha", "middle"]);
}

#[test]
fn custom_formatter() {
    let (rewritten, definition) = parse_with(
        "name* = ___",
        formdown_core::default_sanitizer,
        |variable_name, _field| format!("{{{{ {variable_name} }}}}"),
    )
    .unwrap();
    assert_eq!(rewritten, "{{ name }}");
    assert!(definition.contains_key("name"));
}

#[test]
fn spec_scenario_end_to_end() {
    let lines = ["name* = ___[30]", "_age = ___", "[section:user]", "name* = ___"];
    let (definition, rewritten) = FormPreprocessor::with_defaults().run(lines).unwrap();

    let keys: Vec<&str> = definition.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, vec!["name", "age", "user_name"]);
    assert!(definition["age"].is_label_hidden());
    assert_eq!(definition["age"].original_label, "_age");
    assert_eq!(
        rewritten,
        vec!["{{ form.name }}", "{{ form.age }}", "{{ form.user_name }}"]
    );
}

#[test]
fn crlf_input() {
    let (rewritten, definition) = parse("name = @\r\nplain\r\n").unwrap();
    assert_eq!(rewritten, "{{ form.name }}\nplain\n");
    assert!(definition.contains_key("name"));
}
