use std::io;
use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{get, post, web, App, HttpResponse, HttpServer, Responder};
use log::{error, info};
use serde::{Deserialize, Serialize};

use wordgraph_core::store::FileStore;
use wordgraph_core::{AutoComplete, Error};

mod config;

use config::ServerConfig;

/// Body of the `/train` endpoint.
#[derive(Deserialize)]
struct TrainBody {
	input_corpus: String,
}

/// Every endpoint answers `{"result": ...}`.
#[derive(Serialize)]
struct Reply<T: Serialize> {
	result: T,
}

struct SharedData {
	autocomplete: AutoComplete<FileStore>,
}

fn storage_failure(e: Error) -> HttpResponse {
	error!("storage failure: {e}");
	HttpResponse::InternalServerError().body(e.to_string())
}

/// HTTP POST endpoint `/train`
///
/// Folds `input_corpus` into the word graph.
/// Answers `true` once both collections acknowledged the write, `false` when
/// the storage refused one of them.
#[post("/train")]
async fn train_corpus(data: web::Data<Mutex<SharedData>>, body: web::Json<TrainBody>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	match shared_data.autocomplete.train(&body.input_corpus) {
		Ok(_) => HttpResponse::Ok().json(Reply { result: true }),
		Err(Error::PersistenceUnacknowledged { .. }) => HttpResponse::Ok().json(Reply { result: false }),
		Err(e) => storage_failure(e),
	}
}

/// HTTP GET endpoint `/complete/{word}`
///
/// Returns the most likely next word, or 404 with an empty result.
#[get("/complete/{word}")]
async fn complete(data: web::Data<Mutex<SharedData>>, word: web::Path<String>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	match shared_data.autocomplete.complete(&word) {
		Ok(next) => HttpResponse::Ok().json(Reply { result: next }),
		Err(Error::NotFound { .. }) => HttpResponse::NotFound().json(Reply { result: "" }),
		Err(e) => storage_failure(e),
	}
}

/// HTTP GET endpoint `/dropdb`
///
/// Clears both collections of the word graph.
#[get("/dropdb")]
async fn drop_db(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	match shared_data.autocomplete.drop_all() {
		Ok(dropped) => HttpResponse::Ok().json(Reply { result: dropped }),
		Err(e) => storage_failure(e),
	}
}

/// HTTP POST endpoint `/rebuild`
///
/// Derives the prediction index again from the adjacency collection and
/// returns the number of predictions written.
#[post("/rebuild")]
async fn rebuild(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	match shared_data.autocomplete.rebuild_predictions() {
		Ok(count) => HttpResponse::Ok().json(Reply { result: count }),
		Err(e) => storage_failure(e),
	}
}

fn routes(cfg: &mut web::ServiceConfig) {
	cfg.service(train_corpus)
		.service(complete)
		.service(drop_db)
		.service(rebuild);
}

/// Main entry point for the server.
///
/// Opens the file store, wraps the predictor in a `Mutex` so trainings are
/// serialized, and starts an Actix-web HTTP server.
///
/// # Notes
/// - Host, port and data folder come from `ServerConfig::from_env`.
/// - Log level is controlled by `RUST_LOG` (defaults to `info`).
#[actix_web::main]
async fn main() -> io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let config = ServerConfig::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
	let store = FileStore::open(&config.data_dir).map_err(io::Error::other)?;
	let shared_data = SharedData {
		autocomplete: AutoComplete::new(store),
	};
	let shared_model = web::Data::new(Mutex::new(shared_data));

	info!("listening on {}:{}", config.host, config.port);
	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.wrap(Cors::permissive())
			.app_data(shared_model.clone())
			.configure(routes)
	})
		.bind((config.host.as_str(), config.port))?
		.run()
		.await
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::http::StatusCode;
	use actix_web::test;
	use serde_json::{json, Value};

	fn shared(dir: &tempfile::TempDir) -> web::Data<Mutex<SharedData>> {
		let store = FileStore::open(dir.path()).unwrap();
		web::Data::new(Mutex::new(SharedData { autocomplete: AutoComplete::new(store) }))
	}

	#[actix_web::test]
	async fn train_then_complete() {
		let dir = tempfile::tempdir().unwrap();
		let app = test::init_service(App::new().app_data(shared(&dir)).configure(routes)).await;

		let req = test::TestRequest::post()
			.uri("/train")
			.set_json(json!({ "input_corpus": "I want a cat. I want a dog." }))
			.to_request();
		let body: Value = test::call_and_read_body_json(&app, req).await;
		assert_eq!(body, json!({ "result": true }));

		let req = test::TestRequest::get().uri("/complete/I").to_request();
		let body: Value = test::call_and_read_body_json(&app, req).await;
		assert_eq!(body, json!({ "result": "want" }));
	}

	#[actix_web::test]
	async fn unknown_word_is_404() {
		let dir = tempfile::tempdir().unwrap();
		let app = test::init_service(App::new().app_data(shared(&dir)).configure(routes)).await;

		let req = test::TestRequest::get().uri("/complete/unseenword").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::NOT_FOUND);
		let body: Value = test::read_body_json(resp).await;
		assert_eq!(body, json!({ "result": "" }));
	}

	#[actix_web::test]
	async fn dropdb_then_rebuild() {
		let dir = tempfile::tempdir().unwrap();
		let app = test::init_service(App::new().app_data(shared(&dir)).configure(routes)).await;

		let req = test::TestRequest::post()
			.uri("/train")
			.set_json(json!({ "input_corpus": "good morning" }))
			.to_request();
		test::call_service(&app, req).await;

		let req = test::TestRequest::post().uri("/rebuild").to_request();
		let body: Value = test::call_and_read_body_json(&app, req).await;
		assert_eq!(body, json!({ "result": 1 }));

		let req = test::TestRequest::get().uri("/dropdb").to_request();
		let body: Value = test::call_and_read_body_json(&app, req).await;
		assert_eq!(body, json!({ "result": true }));

		let req = test::TestRequest::get().uri("/complete/good").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
	}

	#[actix_web::test]
	async fn malformed_body_is_rejected() {
		let dir = tempfile::tempdir().unwrap();
		let app = test::init_service(App::new().app_data(shared(&dir)).configure(routes)).await;

		let req = test::TestRequest::post()
			.uri("/train")
			.set_json(json!({ "document": "wrong field" }))
			.to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
	}
}
