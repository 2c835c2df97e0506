use serde_json::json;

use crate::common::{TestApp, routes};

fn st_james() -> serde_json::Value {
    json!({
        "id": 6,
        "name": "St James",
        "pricePerKilo": 80,
        "colour": "Yellow"
    })
}

mod cheese_listing {
    use super::*;

    #[tokio::test]
    async fn lists_seeded_cheeses_in_order() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::CHEESES).await;

        assert_eq!(res.status, 200);
        let cheeses = res.body.as_array().expect("array body");
        assert!(cheeses.len() >= 2);
        assert_eq!(cheeses[0]["id"], 1);
        assert_eq!(cheeses[0]["name"], "Cheddar");
        assert_eq!(cheeses[0]["pricePerKilo"].as_f64(), Some(15.0));
        assert_eq!(cheeses[0]["colour"], "Yellow");
        assert!(cheeses[0]["picture"].is_null());
        assert_eq!(cheeses[1]["name"], "Brie");
    }

    #[tokio::test]
    async fn empty_catalogue_lists_nothing() {
        let app = TestApp::spawn_empty().await;

        let res = app.get(routes::CHEESES).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!([]));
    }

    #[tokio::test]
    async fn picture_is_projected_to_image_path() {
        let app = TestApp::spawn_empty().await;
        app.create_cheese(&json!({
            "id": 10,
            "name": "Pont l Eveque",
            "pricePerKilo": 30,
            "colour": "Ivory",
            "picture": "ZHVtbXlJbWFnZURhdGE="
        }))
        .await;

        let res = app.get(routes::CHEESES).await;

        assert_eq!(res.body[0]["picture"], "/images/pont_l eveque.jpg");
    }
}

mod cheese_lookup {
    use super::*;

    #[tokio::test]
    async fn get_existing_cheese() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::cheese(1)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["id"], 1);
        assert_eq!(res.body["name"], "Cheddar");
    }

    #[tokio::test]
    async fn missing_cheese_is_404() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::cheese(99)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body, json!({ "message": "Cheese not found" }));
    }

    #[tokio::test]
    async fn non_numeric_id_is_404() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::cheese("cheddar")).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["message"], "Cheese not found");
    }

    #[tokio::test]
    async fn id_uses_leading_digits() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::cheese("1abc")).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["name"], "Cheddar");
    }

    #[tokio::test]
    async fn price_of_existing_cheese() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::cheese_price(2)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["cheeseId"], 2);
        assert_eq!(res.body["price"].as_f64(), Some(18.0));
    }

    #[tokio::test]
    async fn price_of_missing_cheese_is_404() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::cheese_price(99)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["message"], "Cheese not found");
    }
}

mod cheese_cost {
    use super::*;

    #[tokio::test]
    async fn cost_for_whole_kilos() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::cheese_cost(1, 2)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["cheeseId"], 1);
        assert_eq!(res.body["weight"].as_f64(), Some(2.0));
        assert_eq!(res.body["totalCost"].as_f64(), Some(30.0));
    }

    #[tokio::test]
    async fn cost_for_fractional_weight() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::cheese_cost(2, 0.5)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["totalCost"].as_f64(), Some(9.0));
    }

    #[tokio::test]
    async fn negative_weight_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::cheese_cost(1, -1)).await;

        assert_eq!(res.status, 400);
        assert!(res.text.contains("Invalid weight"), "body: {}", res.text);
    }

    #[tokio::test]
    async fn non_numeric_weight_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::cheese_cost(1, "lots")).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "Invalid weight");
    }

    #[tokio::test]
    async fn weight_is_checked_before_lookup() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::cheese_cost(99, -1)).await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn cost_of_missing_cheese_is_404() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::cheese_cost(99, 2)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["message"], "Cheese not found");
    }
}

mod cheese_creation {
    use super::*;

    #[tokio::test]
    async fn create_returns_201_and_record() {
        let app = TestApp::spawn().await;

        let res = app.create_cheese(&st_james()).await;

        assert_eq!(res.body["id"], 6);
        assert_eq!(res.body["name"], "St James");
        assert!(res.body["picture"].is_null());

        let fetched = app.get(&routes::cheese(6)).await;
        assert_eq!(fetched.status, 200);
        assert_eq!(fetched.body, res.body);
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected_and_store_unchanged() {
        let app = TestApp::spawn().await;
        let before = app.get(routes::CHEESES).await.body;

        let res = app
            .post(
                routes::CHEESES,
                &json!({
                    "id": 1,
                    "name": "Abondance",
                    "pricePerKilo": 82,
                    "colour": "Pale Yellow"
                }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert!(res.text.contains("already exists"), "body: {}", res.text);
        assert_eq!(
            res.body["message"],
            "Failed to create cheese: Cheese with ID 1 already exists"
        );
        assert_eq!(app.get(routes::CHEESES).await.body, before);
    }

    #[tokio::test]
    async fn missing_fields_are_rejected() {
        let app = TestApp::spawn().await;

        let res = app.post(routes::CHEESES, &json!({ "id": 7 })).await;

        assert_eq!(res.status, 400);
        assert!(res.body["message"].is_string());
    }

    #[tokio::test]
    async fn malformed_json_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.post_raw(routes::CHEESES, "{not json").await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "Cheese body is not valid JSON");
    }

    #[tokio::test]
    async fn name_is_stored_as_sent() {
        let app = TestApp::spawn_empty().await;

        let res = app
            .create_cheese(&json!({
                "id": 6,
                "name": " St James ",
                "pricePerKilo": 80,
                "colour": "Yellow"
            }))
            .await;

        assert_eq!(res.body["name"], " St James ");
        assert_eq!(app.get(&routes::cheese(6)).await.body["name"], " St James ");
    }

    #[tokio::test]
    async fn invalid_picture_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::CHEESES,
                &json!({
                    "id": 7,
                    "name": "Gouda",
                    "pricePerKilo": 20,
                    "colour": "Yellow",
                    "picture": "gouda.jpg"
                }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(
            res.body["message"],
            "Picture must be base64 image data or an image path"
        );
        assert_eq!(app.get(&routes::cheese(7)).await.status, 404);
    }

    #[tokio::test]
    async fn negative_price_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::CHEESES,
                &json!({ "id": 7, "name": "Gouda", "pricePerKilo": -5, "colour": "Yellow" }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(app.get(&routes::cheese(7)).await.status, 404);
    }
}

mod cheese_pictures {
    use super::*;

    #[tokio::test]
    async fn picture_bytes_are_served_as_jpeg() {
        let app = TestApp::spawn_empty().await;
        app.create_cheese(&json!({
            "id": 6,
            "name": "St James",
            "pricePerKilo": 80,
            "colour": "Yellow",
            "picture": "ZHVtbXlJbWFnZURhdGE="
        }))
        .await;

        let res = app.get(&routes::cheese_picture(6)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.header("content-type"), Some("image/jpeg"));
        assert_eq!(res.bytes, b"dummyImageData");
    }

    #[tokio::test]
    async fn reference_picture_redirects() {
        let app = TestApp::spawn_empty().await;
        app.create_cheese(&json!({
            "id": 1,
            "name": "Abondance",
            "pricePerKilo": 82,
            "colour": "Pale Yellow",
            "picture": "/images/abondance.jpg"
        }))
        .await;

        let res = app.get(&routes::cheese_picture(1)).await;

        assert_eq!(res.status, 307);
        assert_eq!(res.header("location"), Some("/images/abondance.jpg"));
    }

    #[tokio::test]
    async fn url_picture_redirects() {
        let app = TestApp::spawn_empty().await;
        app.create_cheese(&json!({
            "id": 2,
            "name": "Brie",
            "pricePerKilo": 18,
            "colour": "White",
            "picture": "https://cdn.example/brie.jpg"
        }))
        .await;

        let res = app.get(&routes::cheese_picture(2)).await;

        assert_eq!(res.status, 307);
        assert_eq!(res.header("location"), Some("https://cdn.example/brie.jpg"));
    }

    #[tokio::test]
    async fn cheese_without_picture_is_404() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::cheese_picture(1)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["message"], "Cheese picture not found");
    }

    #[tokio::test]
    async fn seeded_images_are_loaded_and_served() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("cheddar.jpg"), b"cheddar jpeg").unwrap();
        let app = TestApp::spawn_with_images(dir.path().to_path_buf()).await;

        let listed = app.get(&routes::cheese(1)).await;
        assert_eq!(listed.body["picture"], "/images/cheddar.jpg");

        let picture = app.get(&routes::cheese_picture(1)).await;
        assert_eq!(picture.status, 200);
        assert_eq!(picture.bytes, b"cheddar jpeg");

        let file = app.get("/images/cheddar.jpg").await;
        assert_eq!(file.status, 200);
        assert_eq!(file.bytes, b"cheddar jpeg");
    }
}

mod cheese_update {
    use super::*;

    #[tokio::test]
    async fn update_replaces_record_and_path_id_wins() {
        let app = TestApp::spawn().await;

        let res = app
            .put(
                &routes::cheese(1),
                &json!({
                    "id": 42,
                    "name": "Mature Cheddar",
                    "pricePerKilo": 17.5,
                    "colour": "Deep Yellow"
                }),
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["id"], 1);
        assert_eq!(res.body["name"], "Mature Cheddar");
        assert_eq!(res.body["pricePerKilo"].as_f64(), Some(17.5));

        assert_eq!(app.get(&routes::cheese(42)).await.status, 404);
        let cost = app.get(&routes::cheese_cost(1, 2)).await;
        assert_eq!(cost.body["totalCost"].as_f64(), Some(35.0));
    }

    #[tokio::test]
    async fn update_clears_omitted_fields() {
        let app = TestApp::spawn_empty().await;
        app.create_cheese(&json!({
            "id": 6,
            "name": "St James",
            "pricePerKilo": 80,
            "colour": "Yellow",
            "picture": "ZHVtbXlJbWFnZURhdGE="
        }))
        .await;

        let res = app
            .put(
                &routes::cheese(6),
                &json!({ "name": "St James", "pricePerKilo": 80 }),
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["colour"], "");
        assert!(res.body["picture"].is_null());
        assert_eq!(app.get(&routes::cheese_picture(6)).await.status, 404);
    }

    #[tokio::test]
    async fn update_missing_cheese_is_404() {
        let app = TestApp::spawn().await;
        let before = app.get(routes::CHEESES).await.body;

        let res = app.put(&routes::cheese(99), &st_james()).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["message"], "Cheese not found");
        assert_eq!(app.get(routes::CHEESES).await.body, before);
    }

    #[tokio::test]
    async fn update_invalid_body_is_400() {
        let app = TestApp::spawn().await;
        let before = app.get(routes::CHEESES).await.body;

        let blank_name = app
            .put(&routes::cheese(1), &json!({ "name": "  ", "pricePerKilo": 15 }))
            .await;
        assert_eq!(blank_name.status, 400);
        assert_eq!(blank_name.body["message"], "Name must not be empty");

        let negative_price = app
            .put(&routes::cheese(1), &json!({ "name": "Cheddar", "pricePerKilo": -1 }))
            .await;
        assert_eq!(negative_price.status, 400);
        assert!(negative_price.body["message"].is_string());

        let bad_picture = app
            .put(
                &routes::cheese(1),
                &json!({ "name": "Cheddar", "pricePerKilo": 15, "picture": "cheddar" }),
            )
            .await;
        assert_eq!(bad_picture.status, 400);

        let malformed = app.put_raw(&routes::cheese(1), "{\"name\": ").await;
        assert_eq!(malformed.status, 400);
        assert_eq!(malformed.body["message"], "Cheese body is not valid JSON");

        assert_eq!(app.get(routes::CHEESES).await.body, before);
    }
}

mod cheese_deletion {
    use super::*;

    #[tokio::test]
    async fn delete_returns_204_and_removes() {
        let app = TestApp::spawn().await;

        let res = app.delete(&routes::cheese(1)).await;

        assert_eq!(res.status, 204);
        assert!(res.bytes.is_empty());
        assert_eq!(app.get(&routes::cheese(1)).await.status, 404);
    }

    #[tokio::test]
    async fn delete_missing_cheese_is_404() {
        let app = TestApp::spawn().await;

        let res = app.delete(&routes::cheese(99)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["message"], "Cheese not found");
    }

    #[tokio::test]
    async fn deleted_id_can_be_reused() {
        let app = TestApp::spawn().await;
        app.delete(&routes::cheese(2)).await;

        let res = app
            .post(
                routes::CHEESES,
                &json!({ "id": 2, "name": "Gouda", "pricePerKilo": 20, "colour": "Yellow" }),
            )
            .await;

        assert_eq!(res.status, 201);
    }
}

mod api_docs {
    use super::*;

    #[tokio::test]
    async fn openapi_document_lists_cheese_routes() {
        let app = TestApp::spawn().await;

        let res = app.get("/api-docs/openapi.json").await;

        assert_eq!(res.status, 200);
        assert!(res.body["paths"].as_object().is_some_and(|paths| paths
            .keys()
            .any(|p| p.starts_with("/api/cheeses"))));
    }
}

mod static_files {
    use super::*;
    use cheese_server::config::CatalogueConfig;

    #[tokio::test]
    async fn frontend_is_served_from_static_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>Cheeses</h1>").unwrap();
        let app = TestApp::spawn_with(CatalogueConfig {
            static_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        })
        .await;

        let index = app.get("/").await;
        assert_eq!(index.status, 200);
        assert_eq!(index.text, "<h1>Cheeses</h1>");

        let file = app.get("/index.html").await;
        assert_eq!(file.status, 200);
        assert!(file.header("content-type").is_some_and(|ct| ct.starts_with("text/html")));

        let api = app.get(&routes::cheese(1)).await;
        assert_eq!(api.body["name"], "Cheddar");
    }
}

mod cors {
    use super::*;

    #[tokio::test]
    async fn preflight_allows_any_origin_by_default() {
        let app = TestApp::spawn().await;

        let res = app
            .preflight(routes::CHEESES, "http://localhost:3000", "POST")
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.header("access-control-allow-origin"), Some("*"));
        assert!(
            res.header("access-control-allow-methods")
                .is_some_and(|m| m.contains("POST"))
        );
    }

    #[tokio::test]
    async fn preflight_respects_configured_origins() {
        let app = TestApp::spawn_with_cors(&["http://localhost:3000"]).await;

        let allowed = app
            .preflight(&routes::cheese(1), "http://localhost:3000", "PUT")
            .await;
        assert_eq!(
            allowed.header("access-control-allow-origin"),
            Some("http://localhost:3000")
        );

        let denied = app
            .preflight(&routes::cheese(1), "http://evil.example", "PUT")
            .await;
        assert_eq!(denied.header("access-control-allow-origin"), None);
    }
}
