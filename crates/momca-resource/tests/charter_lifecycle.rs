//! # Charter Lifecycle
//!
//! A charter moving through import, private editing, saving and publishing,
//! checked through stored content the way a database round trip sees it.

use momca_core::{CharterId, CharterStatus, StoreLayout, UserId};
use momca_resource::{Charter, ExistResource, ResourceError, XpathQuery};

fn reload(charter: &Charter) -> Charter {
    let resource = charter.resource();
    Charter::from_resource(
        ExistResource::new(resource.name(), resource.parent_path(), resource.content())
            .expect("stored content parses"),
        charter.layout().clone(),
    )
    .expect("stored content is a charter")
}

#[test]
fn status_transitions_move_the_resource() {
    let id = CharterId::in_collection("collection", "charter1").unwrap();
    let user = UserId::new("user").unwrap();
    let mut charter = Charter::new(
        id,
        CharterStatus::Imported,
        Some(user),
        StoreLayout::default(),
    )
    .unwrap();

    let expected = [
        (
            CharterStatus::Imported,
            "/db/mom-data/metadata.charter.import/collection",
            "charter1.cei.xml",
        ),
        (
            CharterStatus::Private,
            "/db/mom-data/xrx.user/user/metadata.charter/collection",
            "charter1.charter.xml",
        ),
        (
            CharterStatus::Saved,
            "/db/mom-data/metadata.charter.saved",
            "tag%3Awww.monasterium.net%2C2011%3A%23charter%23collection%23charter1.xml",
        ),
        (
            CharterStatus::Public,
            "/db/mom-data/metadata.charter.public/collection",
            "charter1.cei.xml",
        ),
    ];

    for (status, parent, name) in expected {
        charter.set_status(status).unwrap();
        assert_eq!(charter.resource().parent_path(), parent, "{status}");
        assert_eq!(charter.resource().name(), name, "{status}");

        let reloaded = reload(&charter);
        assert_eq!(reloaded.status(), status);
        assert_eq!(reloaded.id(), charter.id());
        assert_eq!(reloaded.creator(), charter.creator());
    }
}

#[test]
fn archive_fond_charter_keeps_hierarchy_on_rename() {
    let id = CharterId::in_archive_fond("CH-KAE", "Urkunden", "KAE_Urkunde_Nr_1").unwrap();
    let mut charter = Charter::new(id, CharterStatus::Public, None, StoreLayout::default()).unwrap();

    charter.set_identifier("KAE_Urkunde_Nr_2").unwrap();
    assert_eq!(charter.id().archive_identifier(), Some("CH-KAE"));
    assert_eq!(charter.id().fond_identifier(), Some("Urkunden"));
    assert_eq!(
        charter.resource().uri(),
        "/db/mom-data/metadata.charter.public/CH-KAE/Urkunden/KAE_Urkunde_Nr_2.cei.xml"
    );
    assert_eq!(
        charter
            .resource()
            .query_unique(&XpathQuery::atom_id())
            .unwrap()
            .as_deref(),
        Some("tag:www.monasterium.net,2011:/charter/CH-KAE/Urkunden/KAE_Urkunde_Nr_2")
    );
}

#[test]
fn private_charter_follows_its_new_owner() {
    let id = CharterId::in_collection("collection", "charter1").unwrap();
    let mut charter = Charter::new(
        id,
        CharterStatus::Private,
        Some(UserId::new("user").unwrap()),
        StoreLayout::default(),
    )
    .unwrap();

    charter
        .set_creator(Some(UserId::new("other@example.com").unwrap()))
        .unwrap();
    assert_eq!(
        charter.resource().parent_path(),
        "/db/mom-data/xrx.user/other%40example.com/metadata.charter/collection"
    );
    assert_eq!(reload(&charter).creator(), charter.creator());
}

#[test]
fn custom_database_root() {
    let layout = StoreLayout::from_yaml_str("database_root: /db/test-data/\n").unwrap();
    let id = CharterId::in_collection("collection", "charter1").unwrap();
    let charter = Charter::new(id, CharterStatus::Public, None, layout).unwrap();
    assert_eq!(
        charter.resource().uri(),
        "/db/test-data/metadata.charter.public/collection/charter1.cei.xml"
    );
    assert_eq!(
        charter.location().unwrap().uri(charter.layout()),
        charter.resource().uri()
    );
}

#[test]
fn unparseable_content_never_becomes_a_charter() {
    let result = ExistResource::new(
        "charter1.cei.xml",
        "/db/mom-data/metadata.charter.public/collection",
        "<atom:entry xmlns:atom=\"http://www.w3.org/2005/Atom\">",
    );
    assert!(matches!(result, Err(ResourceError::ContentValidation(_))));
}
