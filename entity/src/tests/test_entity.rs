use crate::entry::EntryType;
use crate::site::{self, SiteLifecycle};
use crate::{share_link, user};
use chrono::NaiveDate;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveEnum, DatabaseBackend, EntityTrait, MockDatabase};
use uuid::Uuid;

fn sample_site() -> site::Model {
    site::Model {
        id: Uuid::new_v4(),
        customer: Uuid::new_v4(),
        name: "North Ranch Well 3".to_string(),
        job_number: "J-1042".to_string(),
        latitude: Some(37.4),
        longitude: Some(-120.0),
        address: String::new(),
        category: String::new(),
        status: String::new(),
        notes: String::new(),
        deleted: false,
        deleted_at: None,
        created_by: Uuid::new_v4(),
        created_at: Default::default(),
    }
}

#[test]
fn site_lifecycle_roundtrip() {
    let mut site = sample_site();
    assert_eq!(site.lifecycle(), SiteLifecycle::Active);
    assert!(!site.is_deleted());

    let at = NaiveDate::from_ymd_opt(2025, 3, 14)
        .unwrap()
        .and_hms_opt(9, 26, 53)
        .unwrap();

    let mut active: site::ActiveModel = site.clone().into();
    active.set_lifecycle(SiteLifecycle::Deleted { at });
    site.deleted = true;
    site.deleted_at = Some(at);
    assert_eq!(site.lifecycle(), SiteLifecycle::Deleted { at });
    assert!(site.is_deleted());

    active.set_lifecycle(SiteLifecycle::Active);
    assert!(matches!(active.deleted, Set(false)));
    assert!(matches!(active.deleted_at, Set(None)));
}

#[test]
fn entry_type_db_values() {
    let pairs = [
        (EntryType::General, "general"),
        (EntryType::WellLog, "well_log"),
        (EntryType::AsBuilt, "as_built"),
        (EntryType::PumpCurve, "pump_curve"),
        (EntryType::PumpTest, "pump_test"),
        (EntryType::WellTest, "well_test"),
        (EntryType::PanelCheck, "panel_check"),
    ];

    for (variant, value) in pairs {
        assert_eq!(variant.to_value(), value);
        assert_eq!(EntryType::try_from_value(&value.to_string()).unwrap(), variant);
    }

    assert!(EntryType::try_from_value(&"sitemap".to_string()).is_err());
}

#[test]
fn share_link_debug_redacts_token() {
    let link = share_link::Model {
        id: Uuid::new_v4(),
        site: Uuid::new_v4(),
        date: None,
        token: "supersecrettoken".to_string(),
        revoked: false,
        created_at: Default::default(),
    };

    let debug = format!("{:?}", link);
    assert!(!debug.contains("supersecrettoken"));
    assert!(debug.contains("[redacted]"));
}

#[tokio::test]
async fn find_user_on_mock_database() {
    let expected = user::Model {
        id: Uuid::new_v4(),
        name: "Test User".to_string(),
        email: "test@example.com".to_string(),
        password: None,
        last_login_at: Default::default(),
        created_at: Default::default(),
    };

    let db = MockDatabase::new(DatabaseBackend::Sqlite)
        .append_query_results([vec![expected.clone()]])
        .into_connection();

    assert_eq!(user::Entity::find().one(&db).await.unwrap(), Some(expected));
}
