//! Integration tests for gqle_builder

use gqle_builder::{
    Action, BuildConfig, ComposeOperation, Field, GraphId, NestedObjectParameter, Operation,
    Policy, ScalarParameter, TokenAllocator, Value,
};
use gqle_core::whitespace_insensitive_eq;

fn collaborateur() -> Operation {
    Operation::query("").with_action(
        Action::new("Collaborateur")
            .with_fields(["code", "email", "id", "nom", "prenom"])
            .with_field(Field::complex(
                "taches",
                ["id", "pV1", "pV2", "pV3", "userId"],
            )),
    )
}

fn parametrage() -> Operation {
    Operation::query("").with_action(Action::new("Parametrage").with_fields([
        "categoriePrixKm",
        "categorieTicketResto",
        "dateValidationNdF",
        "dateValidationTP",
        "id",
        "prixKm",
        "prixVente",
        "prixVente2",
        "prixVente3",
    ]))
}

fn chart(action: &str, start_token: &str, end_token: &str) -> Operation {
    Operation::query("").with_action(
        Action::new(action)
            .with_parameter(ScalarParameter::with_token(
                "startDate",
                "01/10/2018",
                start_token,
            ))
            .with_parameter(ScalarParameter::with_token(
                "endDate",
                "17/10/2018",
                end_token,
            ))
            .with_fields(["label", "value"]),
    )
}

/// Mutation with one scalar parameter and one field
#[test]
fn test_mutation_with_parameter() {
    const EXPECTED: &str = r"mutation Test($id:Int!){
        TestQuery(id:$id){
            boolField
        }
    }";

    let built = Operation::mutation("Test")
        .with_action(
            Action::new("TestQuery")
                .with_parameter(ScalarParameter::with_token("id", 12_i64, "id"))
                .with_field("boolField"),
        )
        .build()
        .expect("mutation should build");

    assert!(whitespace_insensitive_eq(built.query(), EXPECTED));
    insta::assert_snapshot!(built.compact_query(), @"mutationTest($id:Int!){TestQuery(id:$id){boolField}}");
    assert_eq!(built.variables().get("id"), Some(&Value::Int(12)));
}

/// Two compose sub-queries with simple fields
#[test]
fn test_compose_with_simple_fields() {
    const EXPECTED: &str = r"query Test{
        myTest1:query1{
            field1
            field2
        }
        myTest2:query2{
            field1
            field2
        }
    }";

    let first = Operation::query("")
        .compose_mode()
        .with_action(Action::new("query1").with_field("field1").with_field("field2"));
    let second = Operation::query("")
        .compose_mode()
        .with_action(Action::new("query2").with_field("field1").with_field("field2"));

    let built = ComposeOperation::query("Test")
        .with_query("myTest1", first)
        .with_query("myTest2", second)
        .build()
        .expect("compose should build");

    assert!(whitespace_insensitive_eq(built.query(), EXPECTED));
    assert!(built.variables().is_empty());
    assert_eq!(built.operation_name(), Some("Test"));
}

/// Compose sub-query with a complex field next to an unrelated sub-query
#[test]
fn test_compose_with_complex_fields() {
    const EXPECTED: &str = r"query Context {
        collab: Collaborateur {
            code
            email
            id
            nom
            prenom
            taches {
                id
                pV1
                pV2
                pV3
                userId
            }
        }
        param: Parametrage{
            categoriePrixKm
            categorieTicketResto
            dateValidationNdF
            dateValidationTP
            id
            prixKm
            prixVente
            prixVente2
            prixVente3
        }
    }";

    let built = ComposeOperation::query("Context")
        .with_query("collab", collaborateur())
        .with_query("param", parametrage())
        .build()
        .expect("compose should build");

    assert!(whitespace_insensitive_eq(built.query(), EXPECTED));
}

/// Compose sub-queries with explicit tokens share one declaration list
#[test]
fn test_compose_with_parameters() {
    const EXPECTED: &str = r"query Dashboard($param1: String!, $param2: String!, $param3: String!, $param4: String!) {
        chart1: TempsPassesParJour(startDate: $param1, endDate: $param2) {
            label
            value
        }
        chart2: TempsPassesParDossier(startDate: $param3, endDate: $param4) {
            label
            value
        }
    }";

    let built = ComposeOperation::query("Dashboard")
        .with_query("chart1", chart("TempsPassesParJour", "param1", "param2"))
        .with_query("chart2", chart("TempsPassesParDossier", "param3", "param4"))
        .build()
        .expect("compose should build");

    assert!(whitespace_insensitive_eq(built.query(), EXPECTED));
    insta::assert_snapshot!(
        built.compact_query(),
        @"queryDashboard($param1:String!,$param2:String!,$param3:String!,$param4:String!){chart1:TempsPassesParJour(startDate:$param1,endDate:$param2){labelvalue}chart2:TempsPassesParDossier(startDate:$param3,endDate:$param4){labelvalue}}"
    );

    let vars = built.variables();
    assert_eq!(vars.len(), 4);
    assert_eq!(vars.get("param1").and_then(Value::as_str), Some("01/10/2018"));
    assert_eq!(vars.get("param2").and_then(Value::as_str), Some("17/10/2018"));
    assert_eq!(vars.get("param3").and_then(Value::as_str), Some("01/10/2018"));
    assert_eq!(vars.get("param4").and_then(Value::as_str), Some("17/10/2018"));
}

/// Building twice yields the same text and variables
#[test]
fn test_build_is_idempotent() {
    let compose = ComposeOperation::query("Dashboard")
        .with_query("chart1", chart("TempsPassesParJour", "param1", "param2"))
        .with_query("chart2", chart("TempsPassesParDossier", "param3", "param4"));

    let first = compose.build().unwrap();
    let second = compose.build().unwrap();
    assert_eq!(first.query(), second.query());
    assert_eq!(first.variables(), second.variables());
}

/// Every scalar token is bound exactly once with its unwrapped value
#[test]
fn test_every_token_bound_once() {
    let mut tokens = TokenAllocator::new();
    let save = Operation::mutation("Save")
        .with_action(
            Action::new("saveTache")
                .with_input(NestedObjectParameter::new(
                    "tache",
                    [
                        ScalarParameter::new("id", GraphId::new("t-42"), &mut tokens),
                        ScalarParameter::new("label", "Review", &mut tokens),
                        ScalarParameter::new("estimate", Some(1.5_f64), &mut tokens),
                        ScalarParameter::new("assignee", None::<i64>, &mut tokens),
                    ],
                ))
                .with_field("id"),
        )
        .with_action(
            Action::new("touch")
                .with_parameter(ScalarParameter::new("count", 3_i32, &mut tokens))
                .with_field("ok"),
        );

    let built = save.build().unwrap();
    let scalars: Vec<_> = save
        .actions()
        .flat_map(Action::scalar_parameters)
        .collect();

    assert_eq!(built.variables().len(), scalars.len());
    for param in scalars {
        let token = param.token().as_str();
        assert_eq!(built.query().matches(&format!("${token}:")).count(), 1);
        assert_eq!(built.query().matches(&format!("${token}")).count(), 2);
        assert_eq!(
            built.variables().get(token),
            Some(&param.value().clone().unwrap_id())
        );
    }
    assert_eq!(
        built.variables().get("param1"),
        Some(&Value::Text("t-42".into()))
    );
    assert_eq!(built.variables().get("param4"), Some(&Value::Null));
    insta::assert_snapshot!(
        built.compact_query(),
        @"mutationSave($param1:ID!,$param2:String!,$param3:Float,$param4:Int,$param5:Int!){saveTache(input:{id:$param1,label:$param2,estimate:$param3,assignee:$param4}){id}touch(count:$param5){ok}}"
    );
}

/// Emission order follows attachment order
#[test]
fn test_attachment_order_is_preserved() {
    let built = ComposeOperation::query("Order")
        .with_query("z", Operation::query("").with_action(Action::new("last").with_field("b")))
        .with_query("a", Operation::query("").with_action(Action::new("first").with_field("a")))
        .build()
        .unwrap();
    assert_eq!(built.compact_query(), "queryOrder{z:last{b}a:first{a}}");

    let built = Operation::query("Order")
        .with_action(Action::new("zeta").with_fields(["y", "x"]))
        .with_action(Action::new("alpha"))
        .build()
        .unwrap();
    assert_eq!(built.compact_query(), "queryOrder{zeta{yx}alpha}");
}

/// Sub-operations never emit their own keyword or braces
#[test]
fn test_compose_branches_have_no_keyword() {
    let built = ComposeOperation::query("Context")
        .with_query("collab", collaborateur())
        .with_query("param", parametrage())
        .build()
        .unwrap();

    assert_eq!(built.query().matches("query").count(), 1);
    assert!(built.query().starts_with("query Context{"));
    assert!(built.query().ends_with('}'));
}

/// The request body carries query, variables and operation name
#[test]
fn test_request_json() {
    let built = ComposeOperation::query("Dashboard")
        .with_query("chart1", chart("TempsPassesParJour", "param1", "param2"))
        .build()
        .unwrap();

    let body: serde_json::Value = serde_json::from_str(&built.to_json().unwrap()).unwrap();
    assert_eq!(body["operationName"], "Dashboard");
    assert_eq!(
        body["variables"],
        serde_json::json!({ "param1": "01/10/2018", "param2": "17/10/2018" })
    );
    assert_eq!(body["query"], built.query());
}

/// A strict config turns silent irregularities into errors
#[test]
fn test_strict_config_rejects_colliding_explicit_tokens() {
    let compose = ComposeOperation::query("Dashboard")
        .with_query("chart1", chart("TempsPassesParJour", "param1", "param2"))
        .with_query("chart2", chart("TempsPassesParDossier", "param1", "param2"));

    let lenient = compose
        .clone()
        .with_config(BuildConfig::lenient())
        .build()
        .unwrap();
    assert!(lenient.diagnostics().is_empty());
    assert_eq!(lenient.variables().len(), 2);

    let err = compose
        .with_config(BuildConfig::new().token_collisions(Policy::Deny))
        .build()
        .unwrap_err();
    assert_eq!(err.code(), gqle_core::diagnostics::codes::TOKEN_COLLISION);
}
