mod test_utils;

use reqwest::StatusCode;
use serde_json::{json, Value};
use test_utils::*;

#[actix_rt::test]
async fn about_lifecycle() {
    let Some(mut app) = TestApp::spawn_with_db().await else { return };
    sqlx::query("DELETE FROM about").execute(&app.db_pool).await.unwrap();

    assert_eq!(app.get("/about").await.status(), StatusCode::NOT_FOUND);

    let response = app.post_json("/about", &json!({
        "bio": "I design **brands**.",
        "skills": ["Figma", "Illustration"],
        "experience": [
            {"company": "Acme", "role": "Lead Designer", "start": "2021"},
            {"company": "Studio", "role": "Designer", "start": "2018", "end": "2021"}
        ],
        "hero": {"headline": "Hello"}
    })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = response.json().await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();
    assert!(created["bioHtml"].as_str().unwrap().contains("<strong>brands</strong>"));
    assert!(app.drain_invalidations().contains(&"/about".to_string()));

    let response = app.get(&format!("/about/{}", id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let by_id: Value = response.json().await.unwrap();
    assert_eq!(by_id["id"], id.as_str());
    assert_eq!(by_id["bioHtml"], created["bioHtml"]);

    let second = app.post_json("/about", &json!({"bio": "Again", "skills": []})).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let timeline: Value = app.get("/about/timeline").await.json().await.unwrap();
    assert_eq!(timeline["items"].as_array().unwrap().len(), 2);
    assert_eq!(timeline["items"][0]["side"], "left");
    assert_eq!(timeline["items"][1]["side"], "right");
    assert_eq!(timeline["items"][0]["date"], "2021 – Present");

    let response = app.patch_json(&format!("/about/{}", id), &json!({"hero": null})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.unwrap();
    assert!(updated["hero"].is_null());
    assert_eq!(updated["skills"], created["skills"]);
    assert_eq!(updated["bio"], created["bio"]);

    let fetched: Value = app.get("/about").await.json().await.unwrap();
    assert_eq!(fetched["id"], id.as_str());

    assert_eq!(app.delete(&format!("/about/{}", id)).await.status(), StatusCode::OK);
    assert_eq!(app.get("/about").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.get(&format!("/about/{}", id)).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        app.patch_json(&format!("/about/{}", id), &json!({"bio": "x"})).await.status(),
        StatusCode::NOT_FOUND
    );

    let timeline: Value = app.get("/about/timeline").await.json().await.unwrap();
    assert!(timeline["items"].as_array().unwrap().is_empty());
    assert_eq!(timeline["html"], "");
}

#[actix_rt::test]
async fn contact_lifecycle() {
    let Some(mut app) = TestApp::spawn_with_db().await else { return };
    sqlx::query("DELETE FROM contact").execute(&app.db_pool).await.unwrap();

    let response = app.post_json("/contact", &json!({
        "email": "hello@example.com",
        "phone": "+1 555 0100",
        "socials": {"dribbble": "https://dribbble.com/me"}
    })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = response.json().await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();
    assert!(app.drain_invalidations().contains(&"/contact".to_string()));

    let by_id: Value = app.get(&format!("/contact/{}", id)).await.json().await.unwrap();
    assert_eq!(by_id["id"], id.as_str());
    assert_eq!(by_id["email"], "hello@example.com");

    let second = app.post_json("/contact", &json!({"email": "other@example.com"})).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let response = app.patch_json(&format!("/contact/{}", id), &json!({"address": "Lagos"})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["address"], "Lagos");
    assert_eq!(updated["email"], "hello@example.com");
    assert_eq!(updated["socials"]["dribbble"], "https://dribbble.com/me");

    assert_eq!(app.delete(&format!("/contact/{}", id)).await.status(), StatusCode::OK);
    assert_eq!(app.get("/contact").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.get(&format!("/contact/{}", id)).await.status(), StatusCode::NOT_FOUND);
}
