use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::debug;

/// API key accepted when none is configured.
pub const DEFAULT_API_KEY: &str = "test-api-key";

const DIACRITICS: [char; 9] = [
    '\u{064B}', '\u{064C}', '\u{064D}', '\u{064E}', '\u{064F}', '\u{0650}', '\u{0651}', '\u{0652}',
    '\u{0670}',
];

pub struct Store {
    pub api_key: String,
    pub lexicons: Vec<Value>,
    pub entries: Vec<Value>,
}

pub type Db = Arc<Store>;

#[derive(Debug, Deserialize)]
pub struct LookupParams {
    pub query: Option<String>,
    #[serde(rename = "lexiconIds")]
    pub lexicon_ids: Option<String>,
}

type ApiResult = Result<Json<Value>, (StatusCode, String)>;

pub fn app(api_key: &str) -> Router {
    let db: Db = Arc::new(Store {
        api_key: api_key.to_string(),
        lexicons: seed_lexicons(),
        entries: seed_entries(),
    });
    Router::new()
        .route("/api/v1/external/{access}/{operation}", get(lookup))
        .with_state(db)
}

pub async fn run(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(api_key)).await
}

async fn lookup(
    State(db): State<Db>,
    Path((access, operation)): Path<(String, String)>,
    Query(params): Query<LookupParams>,
    headers: HeaderMap,
) -> ApiResult {
    debug!("GET {access}/{operation} {params:?}");

    let authorized = headers
        .get("apikey")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|key| key == db.api_key);
    if !authorized {
        return Err((StatusCode::UNAUTHORIZED, "unauthorized".to_string()));
    }

    let private = match access.as_str() {
        "public" => false,
        "private" => true,
        _ => return Err((StatusCode::NOT_FOUND, format!("unknown access {access}"))),
    };

    if operation == "lexicons" {
        if private {
            return Err((StatusCode::NOT_FOUND, "no private lexicon listing".to_string()));
        }
        let public: Vec<Value> = db
            .lexicons
            .iter()
            .filter(|l| l["isPublic"] == true)
            .cloned()
            .collect();
        return Ok(Json(Value::Array(public)));
    }

    let query = params
        .query
        .filter(|q| !q.trim().is_empty())
        .ok_or((StatusCode::BAD_REQUEST, "query is required".to_string()))?;
    let ids: Option<Vec<String>> = params
        .lexicon_ids
        .filter(|ids| !ids.is_empty())
        .map(|ids| ids.split(',').map(str::to_string).collect());
    if private && ids.is_none() {
        return Err((StatusCode::BAD_REQUEST, "lexiconIds is required".to_string()));
    }

    let matches = db.matching_entries(&query, ids.as_deref(), private);
    let items: Vec<Value> = match operation.as_str() {
        "search" => return Ok(Json(Value::Array(matches.into_iter().cloned().collect()))),
        "senses" => matches.iter().flat_map(|e| array(&e["senses"])).collect(),
        "examples" => matches
            .iter()
            .flat_map(|e| array(&e["senses"]))
            .flat_map(|s| array(&s["examples"]))
            .collect(),
        "synonyms" => relations(&matches, "synonym"),
        "opposites" => relations(&matches, "opposite"),
        "pos" => project(&matches, "pos"),
        "root" => project(&matches, "root"),
        "pattern" => project(&matches, "pattern"),
        "conjugations" => matches.iter().flat_map(|e| array(&e["wordForms"])).collect(),
        _ => return Err((StatusCode::NOT_FOUND, format!("unknown operation {operation}"))),
    };
    Ok(Json(json!({ "query": query, operation: items })))
}

impl Store {
    fn is_public_lexicon(&self, id: &str) -> bool {
        self.lexicons
            .iter()
            .any(|l| l["id"] == id && l["isPublic"] == true)
    }

    fn matching_entries(&self, query: &str, ids: Option<&[String]>, private: bool) -> Vec<&Value> {
        let plain = strip(query.trim());
        self.entries
            .iter()
            .filter(|e| {
                let lexicon = e["lexiconId"].as_str().unwrap_or_default();
                let scoped = match ids {
                    Some(ids) => ids.iter().any(|id| id == lexicon),
                    None => true,
                };
                scoped && (private || self.is_public_lexicon(lexicon))
            })
            .filter(|e| e["nonDiacriticsLemma"] == plain.as_str() || e["lemma"] == query)
            .collect()
    }
}

fn strip(text: &str) -> String {
    text.chars().filter(|c| !DIACRITICS.contains(c)).collect()
}

fn array(value: &Value) -> Vec<Value> {
    value.as_array().cloned().unwrap_or_default()
}

fn relations(entries: &[&Value], kind: &str) -> Vec<Value> {
    entries
        .iter()
        .flat_map(|e| array(&e["senses"]))
        .flat_map(|s| array(&s["relations"]))
        .filter(|r| r["type"] == kind)
        .collect()
}

fn project(entries: &[&Value], field: &str) -> Vec<Value> {
    entries
        .iter()
        .map(|e| {
            json!({
                "lexicalEntryId": e["lexicalEntryId"],
                "lemma": e["lemma"],
                field: e[field],
            })
        })
        .collect()
}

fn seed_lexicons() -> Vec<Value> {
    vec![
        json!({
            "id": "1",
            "name": "المعجم المعاصر",
            "title": "Contemporary Arabic Lexicon",
            "version": "1.0",
            "isPublished": true,
            "isPublic": true,
            "status": "PUBLISHED",
            "domainIds": ["general"],
            "createdAt": "2024-01-15T08:30:00Z"
        }),
        json!({
            "id": "2",
            "name": "معجم المصطلحات",
            "isPublished": false,
            "isPublic": false
        }),
    ]
}

fn seed_entries() -> Vec<Value> {
    vec![
        json!({
            "lexicalEntryId": "100",
            "lexiconId": "1",
            "lexiconName": "المعجم المعاصر",
            "lemma": "مُحَرِّك",
            "lemmaType": "singleWord",
            "pattern": "مُفَعِّل",
            "pos": "N",
            "root": ["ح", "ر", "ك"],
            "nonDiacriticsLemma": "محرك",
            "lemmaLanguage": "ar",
            "senses": [{
                "definition": "آلة تحول الطاقة إلى حركة",
                "translations": [{"word": "engine", "language": "en", "languageLabel": "English"}],
                "examples": [{"word": "محرك السيارة", "type": "example"}],
                "relations": [
                    {"type": "synonym", "targetId": "101"},
                    {"type": "opposite", "targetId": "102"}
                ]
            }],
            "wordForms": [{"form": "محركات", "number": "3", "gender": "m"}],
            "sortGroupOrder": 1
        }),
        json!({
            "lexicalEntryId": "200",
            "lexiconId": "1",
            "lexiconName": "المعجم المعاصر",
            "lemma": "كَتَبَ",
            "lemmaType": "singleWord",
            "pattern": "فَعَلَ",
            "pos": "VT",
            "root": ["ك", "ت", "ب"],
            "nonDiacriticsLemma": "كتب",
            "lemmaLanguage": "ar",
            "senses": [{"definition": "خط الحروف"}],
            "wordForms": [
                {"form": "يكتب", "aspect": "S", "person": "3", "voice": "a"},
                {"form": "كُتِب", "aspect": "P", "voice": "p"}
            ]
        }),
        json!({
            "lexicalEntryId": "300",
            "lexiconId": "2",
            "lexiconName": "معجم المصطلحات",
            "lemma": "مُحَرِّك",
            "lemmaType": "singleWord",
            "pattern": "مُفَعِّل",
            "pos": "NM",
            "nonDiacriticsLemma": "محرك",
            "lemmaLanguage": "ar",
            "senses": [{"definition": "وحدة الدفع في الآلة"}]
        }),
    ]
}
