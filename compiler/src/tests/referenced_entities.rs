use serde_json::json;

use super::test_utils::get_test_resource;
use crate::{
    ast::Query, BucketPolicy, Compiler, Options, RelationResolver, RelationSpec, RelationState,
    Related, ResponseEnvelope,
};

fn specs() -> Vec<RelationSpec> {
    vec![
        RelationSpec::new("customer").hydrate_as("party"),
        RelationSpec::new("currency"),
        RelationSpec::new("author").with_foreign_key("createdById"),
    ]
}

#[test]
fn test_include_and_resolve() {
    let specs = specs();
    let query = Query::new("invoice").limit(3).include_relations(&specs);
    let request = Compiler::new(Options::default()).compile(&query).unwrap();
    assert_eq!(
        request.param("includeReferencedEntities"),
        Some("customerId,currencyId,createdById")
    );

    let envelope: ResponseEnvelope =
        serde_json::from_str(&get_test_resource("invoice_response.json")).unwrap();
    let (mut invoices, referenced) = envelope.into_parts("invoice");
    RelationResolver::new(BucketPolicy::new()).resolve(&mut invoices, &referenced, &specs);

    let RelationState::Loaded(Related::Record(customer)) = invoices[0].relation("customer") else {
        panic!("customer should be hydrated");
    };
    assert_eq!(customer.kind, "party");
    assert_eq!(customer.get("name"), Some(&json!("Acme s.r.o.")));
    assert_eq!(invoices[0].relation("author"), RelationState::Null);

    let RelationState::Loaded(Related::Raw(currency)) = invoices[1].relation("currency") else {
        panic!("currency should be attached");
    };
    assert_eq!(currency["code"], json!("EUR"));
    let RelationState::Loaded(Related::Raw(author)) = invoices[1].relation("author") else {
        panic!("author should be attached");
    };
    assert_eq!(author["login"], json!("jnovak"));

    // Customer 99 was not part of the response and needs fetching separately
    assert_eq!(invoices[2].relation("customer"), RelationState::Unset);
}

#[test]
fn test_response_without_referenced_entities() {
    let envelope: ResponseEnvelope =
        serde_json::from_str(r#"{ "data": [{ "id": 1, "customerId": 10 }] }"#).unwrap();
    let (mut invoices, referenced) = envelope.into_parts("invoice");
    RelationResolver::new(BucketPolicy::new()).resolve(&mut invoices, &referenced, &specs());
    assert!(invoices[0].relations().is_empty());
}
