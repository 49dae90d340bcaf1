use std::path::{Path, PathBuf};
use std::sync::Mutex;

use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rs_markov_core::MarkovError;
use rs_markov_core::io::{list_sources, normalize_folder};
use rs_markov_core::model::config::{parse_prefix_length, parse_sentence_count};
use rs_markov_core::model::{Session, SessionConfig};

/// Folder holding the `.txt` training sources.
const DATA_FOLDER: &str = "./data";

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	count: Option<usize>,
	seed: Option<u64>,
}

#[derive(Deserialize)]
struct SourceQuery {
	names: Option<String>
}

#[derive(Deserialize)]
struct ValueQuery {
	value: Option<String>
}

struct SharedData {
	session: Session
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates sentences from the current model. `count` defaults to the
/// configured sentence count; `seed` makes the output reproducible.
/// Sentences are separated by a blank line.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Session lock failed"),
	};

	let count = query.count.unwrap_or(shared_data.session.config().sentence_count);
	let mut rng = match query.seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_rng(&mut rand::rng()),
	};

	match shared_data.session.generate_count(count, &mut rng) {
		Ok(sentences) => HttpResponse::Ok().body(sentences.join("\n\n")),
		Err(e @ MarkovError::InsufficientData) => HttpResponse::BadRequest().body(e.to_string()),
		Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

#[get("/v1/sources")]
async fn get_sources() -> impl Responder {
	match list_sources(normalize_folder(DATA_FOLDER), "txt") {
		Ok(sources) => HttpResponse::Ok().body(sources.join("\n")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list sources")
	}
}

#[get("/v1/trained_sources")]
async fn get_trained_sources(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Session lock failed"),
	};

	let sources: Vec<String> = shared_data
		.session
		.trained_sources()
		.iter()
		.map(|path| path.display().to_string())
		.collect();
	HttpResponse::Ok().body(sources.join("\n"))
}

#[get("/v1/stats")]
async fn get_stats(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Session lock failed"),
	};

	match serde_json::to_string(&shared_data.session.model().stats()) {
		Ok(body) => HttpResponse::Ok().content_type("application/json").body(body),
		Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

/// Resolves a source name to `<folder>/<name>.txt`.
///
/// Returns `None` for names that could leave `folder`: names holding a
/// path separator and the `.`/`..` components.
fn source_path(folder: &Path, name: &str) -> Option<PathBuf> {
	if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
		return None;
	}
	Some(folder.join(format!("{name}.txt")))
}

/// HTTP PUT endpoint `/v1/train`
///
/// Trains every named source (`./data/<name>.txt`) in order. A failing
/// source is reported and skipped; the others are still trained.
#[put("/v1/train")]
async fn put_train(data: web::Data<Mutex<SharedData>>, query: web::Query<SourceQuery>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Session lock failed"),
	};

	let query_names = match &query.names {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty source name"),
	};

	let folder = normalize_folder(DATA_FOLDER);
	let mut report = Vec::new();
	for name in query_names.split(',').map(str::trim).filter(|s| !s.is_empty()) {
		let Some(path) = source_path(&folder, name) else {
			warn!(source = name, "invalid source name");
			report.push(format!("{name}: skipped (invalid source name)"));
			continue;
		};
		match shared_data.session.train(&path) {
			Ok(tokens) => report.push(format!("{name}: trained ({tokens} tokens)")),
			Err(e) => {
				warn!(source = name, error = %e, "source skipped");
				report.push(format!("{name}: skipped ({e})"));
			}
		}
	}

	HttpResponse::Ok().body(report.join("\n"))
}

#[put("/v1/prefix_length")]
async fn put_prefix_length(data: web::Data<Mutex<SharedData>>, query: web::Query<ValueQuery>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Session lock failed"),
	};

	let prefix_length = match parse_prefix_length(query.value.as_deref().unwrap_or_default()) {
		Ok(n) => n,
		Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
	};

	match shared_data.session.set_prefix_length(prefix_length) {
		Ok(()) => HttpResponse::Ok().body("All texts re-trained"),
		Err(e) => HttpResponse::BadRequest().body(e.to_string()),
	}
}

#[put("/v1/sentence_count")]
async fn put_sentence_count(data: web::Data<Mutex<SharedData>>, query: web::Query<ValueQuery>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Session lock failed"),
	};

	match parse_sentence_count(query.value.as_deref().unwrap_or_default()) {
		Ok(count) => {
			shared_data.session.set_sentence_count(count);
			HttpResponse::Ok().body(format!("Sentence count set to {count}"))
		}
		Err(e) => HttpResponse::BadRequest().body(e.to_string()),
	}
}

/// Main entry point for the server.
///
/// Creates an untrained session, wraps it in a `Mutex` so that training,
/// retraining and generation never overlap, and starts an Actix-web HTTP
/// server bound to 127.0.0.1:5000.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.init();

	let session = Session::new(SessionConfig::default())
		.map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
	let shared_session = web::Data::new(Mutex::new(SharedData { session }));

	info!("listening on 127.0.0.1:5000");
	HttpServer::new(move || {
		App::new()
			.app_data(shared_session.clone())
			.service(get_generated)
			.service(get_sources)
			.service(get_trained_sources)
			.service(get_stats)
			.service(put_train)
			.service(put_prefix_length)
			.service(put_sentence_count)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}
