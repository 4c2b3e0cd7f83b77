use giftbook_core::{
    Birthday, BirthdayParseError, IdeaDimensions, IdeaDraft, Person, PersonDraft, ValidationError,
};

#[test]
fn person_draft_trims_and_assigns_fresh_ids() {
    let first = PersonDraft::new("  Ana ", " 03/10/1990 ").validate().unwrap();
    let second = PersonDraft::new("Ana", "03/10/1990").validate().unwrap();

    assert_eq!(first.name, "Ana");
    assert_eq!(first.dob, "03/10/1990");
    assert!(first.ideas.is_empty());
    assert!(!first.id.is_nil());
    assert_ne!(first.id, second.id);
}

#[test]
fn person_draft_rejects_blank_and_malformed_input() {
    assert_eq!(
        PersonDraft::new("   ", "03/10/1990").validate().unwrap_err(),
        ValidationError::EmptyName
    );
    assert_eq!(
        PersonDraft::new("Ana", "").validate().unwrap_err(),
        ValidationError::EmptyDob
    );
    assert_eq!(
        PersonDraft::new("Ana", "1990-03-10").validate().unwrap_err(),
        ValidationError::InvalidDob(BirthdayParseError::Format("1990-03-10".to_string()))
    );
    assert!(matches!(
        PersonDraft::new("Ana", "02/30/1990").validate(),
        Err(ValidationError::InvalidDob(BirthdayParseError::OutOfRange { month: 2, day: 30 }))
    ));
}

#[test]
fn idea_draft_requires_text_image_and_positive_size() {
    let size = IdeaDimensions::for_screen_width(390.0);

    let idea = IdeaDraft::new(" Scarf ", " file://a.jpg ", size).validate().unwrap();
    assert_eq!(idea.text, "Scarf");
    assert_eq!(idea.img, "file://a.jpg");
    assert_eq!(idea.dimensions(), size);

    assert_eq!(
        IdeaDraft::new("", "file://a.jpg", size).validate().unwrap_err(),
        ValidationError::EmptyText
    );
    assert_eq!(
        IdeaDraft::new("Scarf", "  ", size).validate().unwrap_err(),
        ValidationError::EmptyImage
    );
    let flat = IdeaDimensions {
        width: 100.0,
        height: 0.0,
    };
    assert!(matches!(
        IdeaDraft::new("Scarf", "file://a.jpg", flat).validate(),
        Err(ValidationError::InvalidDimensions { .. })
    ));
}

#[test]
fn capture_dimensions_follow_fixed_ratios() {
    let size = IdeaDimensions::for_screen_width(300.0);
    assert!((size.width - 210.0).abs() < 1e-9);
    assert!((size.height - 140.0).abs() < 1e-9);
    assert!(size.is_renderable());
    assert!(!IdeaDimensions::for_screen_width(f64::NAN).is_renderable());
}

#[test]
fn person_birthday_ignores_year() {
    let a = Person::new("A", "07/04/1970");
    let b = Person::new("B", "7/4/2020");
    assert_eq!(a.birthday().unwrap(), b.birthday().unwrap());
    assert_eq!(a.birthday().unwrap(), Birthday::new(7, 4).unwrap());
    assert_eq!(a.birthday().unwrap().to_string(), "07/04");
}

#[test]
fn validation_errors_read_well() {
    let err = PersonDraft::new("Ana", "soon").validate().unwrap_err();
    assert!(err.to_string().contains("MM/DD/YYYY"));
    assert!(std::error::Error::source(&err).is_some());
}
