// Store-backed scenarios for the saved-scheme membership and profile merge
// paths. These need a running MongoDB, so they are ignored by default:
//
//   DATABASE_URL=mongodb://localhost:27017/SchemeDiscovery cargo test -- --ignored
//
// Each test works on its own throwaway user (and scheme) document and cleans
// up after itself.

use mongodb::bson::doc;
use uuid::Uuid;

use scheme_service::database::MongoDB;
use scheme_service::models::{Scheme, User};
use scheme_service::services::profile_service::{self, ProfilePatch};
use scheme_service::services::saved_scheme_service::{self, SaveSchemeRequest};
use scheme_service::utils::AppError;

async fn connect() -> MongoDB {
    let uri = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set to run the store-backed tests");
    MongoDB::new(&uri).await.expect("Failed to connect to MongoDB")
}

fn blank_user(email: &str) -> User {
    User {
        _id: None,
        email: email.to_string(),
        password: None,
        name: None,
        phone_number: None,
        date_of_birth: None,
        gender: None,
        address: None,
        city: None,
        state: None,
        pincode: None,
        income_range: None,
        education_level: None,
        employment_status: None,
        occupation: None,
        family_size: None,
        category: None,
        disability: None,
        disability_details: None,
        saved_schemes: Vec::new(),
        created_at: None,
        updated_at: None,
        last_login: None,
    }
}

async fn insert_user(db: &MongoDB) -> String {
    let email = format!("store-test-{}@example.com", Uuid::new_v4());
    db.collection::<User>("users")
        .insert_one(&blank_user(&email))
        .await
        .expect("insert user");
    email
}

async fn delete_user(db: &MongoDB, email: &str) {
    db.collection::<User>("users")
        .delete_one(doc! { "email": email })
        .await
        .expect("delete user");
}

fn save_request(id: &str) -> SaveSchemeRequest {
    SaveSchemeRequest {
        scheme_id: Some(id.to_string()),
    }
}

#[actix_web::test]
#[ignore = "requires a running MongoDB (DATABASE_URL)"]
async fn add_add_remove_sequence_matches_the_contract() {
    let db = connect().await;
    let email = insert_user(&db).await;

    // Add("s1") -> ["s1"]
    let saved = saved_scheme_service::add_saved_scheme(&db, &email, save_request("s1"))
        .await
        .unwrap();
    assert_eq!(saved, vec!["s1"]);

    // Add("s2") appends, preserving order -> ["s1", "s2"]
    let saved = saved_scheme_service::add_saved_scheme(&db, &email, save_request("s2"))
        .await
        .unwrap();
    assert_eq!(saved, vec!["s1", "s2"]);

    // Add("s2") again is idempotent: same sequence, s2 exactly once
    let saved = saved_scheme_service::add_saved_scheme(&db, &email, save_request("s2"))
        .await
        .unwrap();
    assert_eq!(saved, vec!["s1", "s2"]);
    assert_eq!(saved.iter().filter(|id| *id == "s2").count(), 1);

    // Remove("s1") -> ["s2"]
    let saved = saved_scheme_service::remove_saved_scheme(&db, &email, save_request("s1"))
        .await
        .unwrap();
    assert_eq!(saved, vec!["s2"]);

    // Remove("s1") again: success no-op, unchanged
    let saved = saved_scheme_service::remove_saved_scheme(&db, &email, save_request("s1"))
        .await
        .unwrap();
    assert_eq!(saved, vec!["s2"]);

    // List agrees with the last returned sequence
    let listed = saved_scheme_service::list_saved_schemes(&db, &email)
        .await
        .unwrap();
    assert_eq!(listed, vec!["s2"]);

    delete_user(&db, &email).await;
}

#[actix_web::test]
#[ignore = "requires a running MongoDB (DATABASE_URL)"]
async fn removing_from_an_empty_list_is_a_success_noop() {
    let db = connect().await;
    let email = insert_user(&db).await;

    let saved = saved_scheme_service::remove_saved_scheme(&db, &email, save_request("ghost"))
        .await
        .unwrap();
    assert!(saved.is_empty());

    delete_user(&db, &email).await;
}

#[actix_web::test]
#[ignore = "requires a running MongoDB (DATABASE_URL)"]
async fn saved_scheme_ops_fail_with_not_found_for_unknown_users() {
    let db = connect().await;
    let email = format!("nobody-{}@example.com", Uuid::new_v4());

    let err = saved_scheme_service::list_saved_schemes(&db, &email)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = saved_scheme_service::add_saved_scheme(&db, &email, save_request("s1"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[actix_web::test]
#[ignore = "requires a running MongoDB (DATABASE_URL)"]
async fn details_skip_ids_missing_from_the_catalog() {
    let db = connect().await;
    let email = insert_user(&db).await;

    let real_id = format!("store-test-scheme-{}", Uuid::new_v4());
    let ghost_id = format!("store-test-ghost-{}", Uuid::new_v4());

    let scheme = Scheme {
        _id: real_id.clone(),
        scheme_name: Some("Test Pension Scheme".to_string()),
        scheme_short_title: None,
        state: None,
        level: None,
        tags: Vec::new(),
        category: Vec::new(),
        detailed_description_md: None,
        open_date: None,
        close_date: None,
        nodal_ministry_name: None,
    };
    db.collection::<Scheme>("schemes")
        .insert_one(&scheme)
        .await
        .expect("insert scheme");

    saved_scheme_service::add_saved_scheme(&db, &email, save_request(&ghost_id))
        .await
        .unwrap();
    saved_scheme_service::add_saved_scheme(&db, &email, save_request(&real_id))
        .await
        .unwrap();

    // The dangling id stays in the raw list but never surfaces in details
    let details = saved_scheme_service::saved_scheme_details(&db, &email)
        .await
        .unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0]._id, real_id);

    db.collection::<Scheme>("schemes")
        .delete_one(doc! { "_id": &real_id })
        .await
        .expect("delete scheme");
    delete_user(&db, &email).await;
}

#[actix_web::test]
#[ignore = "requires a running MongoDB (DATABASE_URL)"]
async fn profile_merge_is_partial_and_updated_at_strictly_increases() {
    let db = connect().await;
    let email = insert_user(&db).await;

    let first = ProfilePatch {
        name: Some("A".to_string()),
        city: Some("Pune".to_string()),
        ..Default::default()
    };
    profile_service::update_profile(&db, &email, &first)
        .await
        .unwrap();

    let user = profile_service::get_profile(&db, &email).await.unwrap();
    assert_eq!(user.name.as_deref(), Some("A"));
    assert_eq!(user.city.as_deref(), Some("Pune"));
    let t1 = user.updated_at.expect("updatedAt stamped");

    // BsonDateTime has millisecond precision; leave room for a strict increase
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    let second = ProfilePatch {
        city: Some("Mumbai".to_string()),
        ..Default::default()
    };
    profile_service::update_profile(&db, &email, &second)
        .await
        .unwrap();

    let user = profile_service::get_profile(&db, &email).await.unwrap();
    // Patched field changed, previously-set field untouched
    assert_eq!(user.city.as_deref(), Some("Mumbai"));
    assert_eq!(user.name.as_deref(), Some("A"));
    let t2 = user.updated_at.expect("updatedAt stamped");
    assert!(t2 > t1, "updatedAt must strictly increase across updates");

    delete_user(&db, &email).await;
}
