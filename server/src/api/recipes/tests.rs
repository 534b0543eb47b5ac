use crate::api::test_support::{db_app, ingredient_names, offline_app, send, send_raw};
use axum::http::{Method, StatusCode};
use axum::Router;
use serde_json::{json, Value};

const RECIPES_URL: &str = "/recipes/";

fn detail_url(id: i64) -> String {
    format!("/recipes/{}/", id)
}

async fn create_recipe(app: &Router, payload: Value) -> Value {
    let (status, body) = send(app, Method::POST, RECIPES_URL, Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
    body
}

async fn create_sample_recipe(app: &Router) -> Value {
    create_recipe(
        app,
        json!({ "title": "Sample recipe title", "description": "Sample description" }),
    )
    .await
}

fn id_of(value: &Value) -> i64 {
    value["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_create_requires_title_without_touching_db() {
    let app = offline_app();

    let (status, body) = send(
        &app,
        Method::POST,
        RECIPES_URL,
        Some(json!({ "description": "No title" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid input");
    assert_eq!(body["fields"]["title"], json!(["This field is required."]));
}

#[tokio::test]
async fn test_create_rejects_wrong_types() {
    let app = offline_app();

    let (status, body) = send(
        &app,
        Method::POST,
        RECIPES_URL,
        Some(json!({ "title": ["Salad"], "ingredients": [{ "name": 3 }] })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"]["title"], json!(["Not a valid string."]));
    assert_eq!(
        body["fields"]["ingredients[0].name"],
        json!(["Not a valid string."])
    );
}

#[tokio::test]
async fn test_create_rejects_malformed_json() {
    let app = offline_app();

    let (status, body) = send_raw(&app, Method::POST, RECIPES_URL, "{\"title\": ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send_raw(&app, Method::POST, RECIPES_URL, "[1, 2]").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Invalid data. Expected a dictionary, but got list."
    );
}

#[tokio::test]
async fn test_create_rejects_null_characters() {
    let app = offline_app();

    let (status, body) = send(
        &app,
        Method::POST,
        RECIPES_URL,
        Some(json!({ "title": "Sal\u{0}ad" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["fields"]["title"],
        json!(["Null characters are not allowed."])
    );

    let (status, body) = send(
        &app,
        Method::POST,
        RECIPES_URL,
        Some(json!({ "title": "Salad", "ingredients": [{ "name": "To\u{0}mato" }] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["fields"]["ingredients[0].name"],
        json!(["Null characters are not allowed."])
    );
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_update_rejects_null_characters() {
    let Some(app) = db_app() else { return };

    let created = create_sample_recipe(&app).await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        &detail_url(id_of(&created)),
        Some(json!({ "description": "Line one\u{0}" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["fields"]["description"],
        json!(["Null characters are not allowed."])
    );

    let (_, fetched) = send(&app, Method::GET, &detail_url(id_of(&created)), None).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_non_numeric_id_is_not_found() {
    let app = offline_app();

    let (status, body) = send(&app, Method::GET, "/recipes/salad/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Not found" }));
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_create_recipe() {
    let Some(app) = db_app() else { return };

    let payload = json!({ "title": "Sample recipe", "description": "Sample description" });
    let created = create_recipe(&app, payload).await;

    assert_eq!(created["title"], "Sample recipe");
    assert_eq!(created["description"], "Sample description");
    assert_eq!(created["ingredients"], json!([]));

    let (status, fetched) = send(&app, Method::GET, &detail_url(id_of(&created)), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_description_defaults_to_empty() {
    let Some(app) = db_app() else { return };

    let created = create_recipe(&app, json!({ "title": "Toast" })).await;
    assert_eq!(created["description"], "");
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_retrieve_recipes_newest_first() {
    let Some(app) = db_app() else { return };

    let first = create_sample_recipe(&app).await;
    let second = create_sample_recipe(&app).await;

    let (status, body) = send(&app, Method::GET, RECIPES_URL, None).await;
    assert_eq!(status, StatusCode::OK);

    let ids: Vec<i64> = body.as_array().unwrap().iter().map(id_of).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(ids, sorted);

    let pos_first = ids.iter().position(|id| *id == id_of(&first)).unwrap();
    let pos_second = ids.iter().position(|id| *id == id_of(&second)).unwrap();
    assert!(pos_second < pos_first);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_list_includes_ingredients() {
    let Some(app) = db_app() else { return };

    let created = create_recipe(
        &app,
        json!({ "title": "Pesto", "ingredients": [{ "name": "Basil" }, { "name": "Pine Nuts" }] }),
    )
    .await;

    let (_, body) = send(&app, Method::GET, RECIPES_URL, None).await;
    let listed = body
        .as_array()
        .unwrap()
        .iter()
        .find(|r| id_of(r) == id_of(&created))
        .unwrap();

    assert_eq!(listed, &created);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_get_missing_recipe() {
    let Some(app) = db_app() else { return };

    let created = create_sample_recipe(&app).await;
    let missing = id_of(&created) + 1000;

    let (status, _) = send(&app, Method::GET, &detail_url(missing), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::PATCH, &detail_url(missing), Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &detail_url(missing), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_partial_update() {
    let Some(app) = db_app() else { return };

    let created = create_recipe(
        &app,
        json!({
            "title": "Sample recipe title",
            "description": "Sample recipe description",
            "ingredients": [{ "name": "Salt" }],
        }),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        &detail_url(id_of(&created)),
        Some(json!({ "title": "Sample recipe title updated" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Sample recipe title updated");
    assert_eq!(body["description"], "Sample recipe description");
    assert_eq!(ingredient_names(&body), vec!["Salt"]);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_full_update() {
    let Some(app) = db_app() else { return };

    let created = create_sample_recipe(&app).await;
    let url = detail_url(id_of(&created));

    let payload = json!({
        "title": "Sample recipe title updated",
        "description": "Sample recipe description updated",
    });
    let (status, body) = send(&app, Method::PUT, &url, Some(payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Sample recipe title updated");
    assert_eq!(body["description"], "Sample recipe description updated");

    let (_, fetched) = send(&app, Method::GET, &url, None).await;
    assert_eq!(fetched, body);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_full_update_requires_title() {
    let Some(app) = db_app() else { return };

    let created = create_sample_recipe(&app).await;
    let url = detail_url(id_of(&created));

    let (status, body) = send(&app, Method::PUT, &url, Some(json!({ "description": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"]["title"], json!(["This field is required."]));

    let (_, fetched) = send(&app, Method::GET, &url, None).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_update_ignores_id_in_payload() {
    let Some(app) = db_app() else { return };

    let created = create_sample_recipe(&app).await;
    let id = id_of(&created);

    let (status, body) = send(
        &app,
        Method::PATCH,
        &detail_url(id),
        Some(json!({ "id": id + 500, "title": "Renamed" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(id_of(&body), id);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_delete_recipe() {
    let Some(app) = db_app() else { return };

    let created = create_recipe(
        &app,
        json!({ "title": "Soup", "ingredients": [{ "name": "Leek" }] }),
    )
    .await;
    let url = detail_url(id_of(&created));

    let (status, body) = send(&app, Method::DELETE, &url, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, Method::GET, &url, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, recipes) = send(&app, Method::GET, RECIPES_URL, None).await;
    assert!(!recipes
        .as_array()
        .unwrap()
        .iter()
        .any(|r| id_of(r) == id_of(&created)));

    // Ingredients outlive the recipe
    let (_, ingredients) = send(&app, Method::GET, "/ingredients/", None).await;
    assert!(ingredients
        .as_array()
        .unwrap()
        .iter()
        .any(|i| i["name"] == "Leek"));
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_create_recipe_with_new_ingredients() {
    let Some(app) = db_app() else { return };

    let created = create_recipe(
        &app,
        json!({
            "title": "Salad",
            "description": "Healthy",
            "ingredients": [{ "name": "Tomato" }, { "name": "Olive Oil" }],
        }),
    )
    .await;

    let ingredients = created["ingredients"].as_array().unwrap();
    assert_eq!(ingredients.len(), 2);
    assert!(ingredients.iter().all(|i| i["id"].is_i64()));
    let mut names = ingredient_names(&created);
    names.sort();
    assert_eq!(names, vec!["Olive Oil", "Tomato"]);

    let (status, body) = send(&app, Method::GET, "/ingredients/", None).await;
    assert_eq!(status, StatusCode::OK);
    let listed: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    let tomato = listed.iter().position(|n| *n == "Tomato").unwrap();
    let olive_oil = listed.iter().position(|n| *n == "Olive Oil").unwrap();
    assert!(tomato < olive_oil);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_create_reuses_existing_ingredients() {
    let Some(app) = db_app() else { return };

    let first = create_recipe(
        &app,
        json!({ "title": "Salsa", "ingredients": [{ "name": "Lime" }, { "name": "Onion" }] }),
    )
    .await;
    let second = create_recipe(
        &app,
        json!({ "title": "Ceviche", "ingredients": [{ "name": "Lime" }] }),
    )
    .await;

    let lime_id = |recipe: &Value| {
        recipe["ingredients"]
            .as_array()
            .unwrap()
            .iter()
            .find(|i| i["name"] == "Lime")
            .map(id_of)
            .unwrap()
    };
    assert_eq!(lime_id(&first), lime_id(&second));

    let (_, body) = send(&app, Method::GET, "/ingredients/", None).await;
    let limes = body
        .as_array()
        .unwrap()
        .iter()
        .filter(|i| i["name"] == "Lime")
        .count();
    assert_eq!(limes, 1);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_duplicate_names_in_one_payload_link_once() {
    let Some(app) = db_app() else { return };

    let created = create_recipe(
        &app,
        json!({ "title": "Garlic bread", "ingredients": [{ "name": "Garlic" }, { "name": "Garlic" }] }),
    )
    .await;

    assert_eq!(ingredient_names(&created), vec!["Garlic"]);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_create_ingredient_on_update() {
    let Some(app) = db_app() else { return };

    let created = create_sample_recipe(&app).await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        &detail_url(id_of(&created)),
        Some(json!({ "ingredients": [{ "name": "Limes" }] })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ingredient_names(&body), vec!["Limes"]);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_update_recipe_assign_ingredient() {
    let Some(app) = db_app() else { return };

    let created = create_recipe(
        &app,
        json!({ "title": "Stir fry", "ingredients": [{ "name": "Pepper" }] }),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        &detail_url(id_of(&created)),
        Some(json!({ "ingredients": [{ "name": "Chili" }] })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ingredient_names(&body), vec!["Chili"]);

    // Pepper is unlinked, not deleted
    let (_, ingredients) = send(&app, Method::GET, "/ingredients/", None).await;
    assert!(ingredients
        .as_array()
        .unwrap()
        .iter()
        .any(|i| i["name"] == "Pepper"));
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_clear_recipe_ingredients() {
    let Some(app) = db_app() else { return };

    let created = create_recipe(
        &app,
        json!({ "title": "Aioli", "ingredients": [{ "name": "Garlic" }] }),
    )
    .await;
    let url = detail_url(id_of(&created));

    let (status, body) = send(&app, Method::PATCH, &url, Some(json!({ "ingredients": [] }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ingredients"], json!([]));

    let (_, fetched) = send(&app, Method::GET, &url, None).await;
    assert_eq!(fetched["ingredients"], json!([]));
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_omitted_ingredients_are_kept() {
    let Some(app) = db_app() else { return };

    let created = create_recipe(
        &app,
        json!({ "title": "Aioli", "ingredients": [{ "name": "Garlic" }] }),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &detail_url(id_of(&created)),
        Some(json!({ "title": "Garlic aioli" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Garlic aioli");
    assert_eq!(ingredient_names(&body), vec!["Garlic"]);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_invalid_update_changes_nothing() {
    let Some(app) = db_app() else { return };

    let created = create_recipe(
        &app,
        json!({ "title": "Aioli", "ingredients": [{ "name": "Garlic" }] }),
    )
    .await;
    let url = detail_url(id_of(&created));

    let (status, body) = send(
        &app,
        Method::PATCH,
        &url,
        Some(json!({ "title": "", "ingredients": [{ "name": "Egg" }] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"]["title"], json!(["This field may not be blank."]));

    let (_, fetched) = send(&app, Method::GET, &url, None).await;
    assert_eq!(fetched, created);
}
