use giftbook_core::{
    decode_snapshot, encode_snapshot, Idea, IdeaDimensions, Person, SnapshotError,
};
use uuid::Uuid;

const ANA_ID: &str = "11111111-2222-4333-8444-555555555555";
const SCARF_ID: &str = "66666666-7777-4888-9999-000000000000";

fn ana_with_scarf() -> Person {
    let mut ana = Person::with_id(Uuid::parse_str(ANA_ID).unwrap(), "Ana", "03/10/1990");
    ana.ideas.push(Idea::with_id(
        Uuid::parse_str(SCARF_ID).unwrap(),
        "Scarf",
        "file://a.jpg",
        IdeaDimensions {
            width: 273.0,
            height: 182.0,
        },
    ));
    ana
}

#[test]
fn snapshot_uses_expected_wire_fields() {
    let raw = encode_snapshot(&[ana_with_scarf()]).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let person = &json[0];
    assert_eq!(person["id"], ANA_ID);
    assert_eq!(person["name"], "Ana");
    assert_eq!(person["dob"], "03/10/1990");
    let idea = &person["ideas"][0];
    assert_eq!(idea["id"], SCARF_ID);
    assert_eq!(idea["text"], "Scarf");
    assert_eq!(idea["img"], "file://a.jpg");
    assert_eq!(idea["width"], 273.0);
    assert_eq!(idea["height"], 182.0);
    assert_eq!(person.as_object().unwrap().len(), 4);
    assert_eq!(idea.as_object().unwrap().len(), 5);
}

#[test]
fn decode_reproduces_encoded_collection() {
    let bo = Person::new("Bo", "01/05/1985");
    let mut cy = Person::new("Cy", "3/1/2000");
    for text in ["Mug", "Tea", "Socks"] {
        cy.ideas.push(Idea::new(
            text,
            format!("file://{text}.jpg"),
            IdeaDimensions::for_screen_width(411.4),
        ));
    }
    let people = vec![ana_with_scarf(), bo, cy];

    let decoded = decode_snapshot(&encode_snapshot(&people).unwrap()).unwrap();
    assert_eq!(decoded, people);
}

#[test]
fn missing_or_null_ideas_decode_as_empty() {
    let raw = format!(
        r#"[
            {{"id":"{ANA_ID}","name":"Ana","dob":"03/10/1990"}},
            {{"id":"{SCARF_ID}","name":"Bo","dob":"01/05/1985","ideas":null}}
        ]"#
    );

    let people = decode_snapshot(&raw).unwrap();
    assert_eq!(people.len(), 2);
    assert!(people.iter().all(|p| p.ideas.is_empty()));
}

#[test]
fn unknown_fields_are_ignored() {
    let raw = format!(
        r#"[{{"id":"{ANA_ID}","name":"Ana","dob":"03/10/1990","ideas":[],"color":"red"}}]"#
    );
    assert_eq!(decode_snapshot(&raw).unwrap()[0].name, "Ana");
}

#[test]
fn invalid_json_and_shapes_are_rejected() {
    for raw in ["", "{", "{}", r#"[{"name":"Ana"}]"#, r#"[{"id":"P1","name":"Ana","dob":"x"}]"#] {
        let err = decode_snapshot(raw).unwrap_err();
        assert!(matches!(err, SnapshotError::Json(_)), "{raw}: {err}");
    }
}

#[test]
fn duplicate_ids_are_rejected() {
    let ana = ana_with_scarf();
    let err = decode_snapshot(&encode_snapshot(&[ana.clone(), ana.clone()]).unwrap()).unwrap_err();
    assert!(matches!(err, SnapshotError::DuplicatePersonId(id) if id == ana.id));

    let mut twice = ana.clone();
    twice.ideas.push(ana.ideas[0].clone());
    let err = decode_snapshot(&encode_snapshot(&[twice]).unwrap()).unwrap_err();
    assert!(matches!(
        err,
        SnapshotError::DuplicateIdeaId { person_id, idea_id }
            if person_id == ana.id && idea_id == ana.ideas[0].id
    ));
}

#[test]
fn empty_collection_round_trips() {
    assert_eq!(encode_snapshot(&[]).unwrap(), "[]");
    assert!(decode_snapshot("[]").unwrap().is_empty());
}

#[test]
fn non_finite_dimensions_are_rejected_on_encode() {
    for (width, height) in [(f64::NAN, 1.0), (1.0, f64::INFINITY), (f64::NEG_INFINITY, 2.0)] {
        let mut ana = ana_with_scarf();
        ana.ideas[0].width = width;
        ana.ideas[0].height = height;

        let err = encode_snapshot(&[ana.clone()]).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::NonFiniteDimensions { person_id, idea_id }
                if person_id == ana.id && idea_id == ana.ideas[0].id
        ));
    }
}
