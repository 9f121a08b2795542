mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

/// Register a dedicated user and return their api key.
async fn obtain_api_key(base_url: &str, email: &str) -> Result<String> {
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/register", base_url))
        .json(&json!({
            "trainid": "T55",
            "name": "Conductor",
            "email": email,
            "zone": "west"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .post(format!("{}/login", base_url))
        .json(&json!({ "email": email, "zone": "west" }))
        .send()
        .await?;
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], false);
    Ok(body["apiKey"].as_str().expect("apiKey").to_string())
}

#[tokio::test]
async fn train_lifecycle_over_http() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let api_key = obtain_api_key(&server.base_url, "lifecycle@example.com").await?;

    // Create
    let res = client
        .post(format!("{}/trains", server.base_url))
        .header("authorization", &api_key)
        .json(&json!({
            "train": {
                "name": "Night Mail",
                "last_date": "2024-03-05",
                "last_time": "23:45",
                "no_of_penalty": 0
            }
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], false);
    assert_eq!(body["message"], "Train added successfully");
    let train_id = body["train_id"].as_i64().expect("train_id");

    // Read back what was submitted
    let res = client
        .get(format!("{}/trains/{}", server.base_url, train_id))
        .header("authorization", &api_key)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["name"], "Night Mail");
    assert_eq!(body["last_date"], "2024-03-05");
    assert_eq!(body["last_time"], "23:45");
    assert_eq!(body["no_of_penalty"], 0);

    // Full-field update
    let res = client
        .put(format!("{}/trains/{}", server.base_url, train_id))
        .header("authorization", &api_key)
        .json(&json!({
            "name": "Night Mail",
            "last_date": "2024-03-06",
            "last_time": "00:10",
            "no_of_penalty": 3
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], false);

    let res = client
        .get(format!("{}/trains/{}", server.base_url, train_id))
        .header("authorization", &api_key)
        .send()
        .await?;
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["no_of_penalty"], 3);

    // Listed among all trains
    let res = client
        .get(format!("{}/trains", server.base_url))
        .header("authorization", &api_key)
        .send()
        .await?;
    let body = res.json::<serde_json::Value>().await?;
    let trains = body["trains"].as_array().expect("trains array");
    assert!(trains.iter().any(|t| t["trainid"] == train_id));

    Ok(())
}

#[tokio::test]
async fn unknown_train_answers_404() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let api_key = obtain_api_key(&server.base_url, "missing@example.com").await?;

    let res = client
        .get(format!("{}/trains/987654", server.base_url))
        .header("authorization", &api_key)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], true);

    Ok(())
}

#[tokio::test]
async fn coaches_are_recorded_and_listed_per_train() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let api_key = obtain_api_key(&server.base_url, "coaches@example.com").await?;

    let res = client
        .post(format!("{}/trains", server.base_url))
        .header("authorization", &api_key)
        .json(&json!({
            "train": {
                "name": "Coastal",
                "last_date": "2024-04-01",
                "last_time": "08:15",
                "no_of_penalty": 1
            }
        }))
        .send()
        .await?;
    let body = res.json::<serde_json::Value>().await?;
    let train_id = body["train_id"].as_i64().expect("train_id");

    let res = client
        .post(format!("{}/trains/{}/coaches", server.base_url, train_id))
        .header("authorization", &api_key)
        .json(&json!({ "coach": { "coachid": "B2", "no_of_penalty": 2 } }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], false);

    let res = client
        .get(format!("{}/{}/coaches", server.base_url, train_id))
        .header("authorization", &api_key)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    let coaches = body["coaches"].as_array().expect("coaches array");
    assert_eq!(coaches.len(), 1);
    assert_eq!(coaches[0]["coachid"], "B2");
    assert_eq!(coaches[0]["trainid"], train_id);
    assert_eq!(coaches[0]["no_of_penalty"], 2);

    Ok(())
}
