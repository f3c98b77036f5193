//! Data model for Siwar API responses.
//!
//! # Design
//! Every record is deserialized field by field through serde derive, so a
//! missing required field fails the whole response with an error naming the
//! field instead of producing a half-filled record. Keys are accepted in the
//! service's lowerCamelCase and in snake_case; unknown keys are ignored.
//! Collections and flags default to empty/false, and a JSON `null` in their
//! place is treated the same as an absent key.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

/// One lexicon (dictionary resource) hosted by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LexiconEntry {
    #[serde(deserialize_with = "non_empty")]
    pub id: String,
    #[serde(deserialize_with = "non_empty")]
    pub name: String,
    pub title: Option<String>,
    pub version: Option<String>,
    #[serde(alias = "version_date")]
    pub version_date: Option<String>,
    #[serde(alias = "publisher_name")]
    pub publisher_name: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "domain_ids", default, deserialize_with = "null_as_default")]
    pub domain_ids: Vec<String>,
    #[serde(default = "default_status", deserialize_with = "status_or_default")]
    pub status: String,
    #[serde(alias = "is_published", default, deserialize_with = "null_as_default")]
    pub is_published: bool,
    #[serde(alias = "is_public", default, deserialize_with = "null_as_default")]
    pub is_public: bool,
    #[serde(alias = "created_at", default, with = "lenient_timestamp")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(alias = "updated_at", default, with = "lenient_timestamp")]
    pub updated_at: Option<OffsetDateTime>,
}

/// Status given to lexicons the service does not report one for.
pub const DEFAULT_LEXICON_STATUS: &str = "DRAFT";

/// One matched lexical entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(alias = "lexical_entry_id")]
    pub lexical_entry_id: String,
    #[serde(alias = "lexicon_id")]
    pub lexicon_id: String,
    #[serde(alias = "lexicon_name")]
    pub lexicon_name: String,
    pub lemma: String,
    #[serde(alias = "lemma_type")]
    pub lemma_type: LemmaType,
    #[serde(alias = "lemma_audio")]
    pub lemma_audio: Option<String>,
    pub pattern: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub senses: Vec<Sense>,
    pub pos: PartOfSpeech,
    #[serde(default, deserialize_with = "null_as_default")]
    pub root: Vec<String>,
    #[serde(alias = "word_forms", default, deserialize_with = "null_as_default")]
    pub word_forms: Vec<WordForm>,
    #[serde(alias = "non_diacritics_lemma")]
    pub non_diacritics_lemma: String,
    #[serde(alias = "lemma_language")]
    pub lemma_language: String,
    #[serde(alias = "is_word_form_match", default, deserialize_with = "null_as_default")]
    pub is_word_form_match: bool,
    #[serde(alias = "is_dialect_match", default, deserialize_with = "null_as_default")]
    pub is_dialect_match: bool,
    #[serde(alias = "is_lemmatizer", default, deserialize_with = "null_as_default")]
    pub is_lemmatizer: bool,
    #[serde(alias = "is_translation_match", default, deserialize_with = "null_as_default")]
    pub is_translation_match: bool,
    #[serde(alias = "is_synonym", default, deserialize_with = "null_as_default")]
    pub is_synonym: bool,
    #[serde(alias = "sort_group_order")]
    pub sort_group_order: Option<i64>,
    #[serde(alias = "lexicon_search_order")]
    pub lexicon_search_order: Option<i64>,
}

/// One meaning of a lexical entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sense {
    pub definition: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub translations: Vec<Translation>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contexts: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub domains: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub examples: Vec<Example>,
    /// Free-form relation records such as `{type, targetId}`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub relations: Vec<BTreeMap<String, String>>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub word: String,
    pub language: String,
    #[serde(alias = "language_label")]
    pub language_label: String,
}

/// A usage example attached to a sense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub word: String,
    #[serde(rename = "type")]
    pub kind: ExampleType,
    pub source: Option<String>,
    pub audio: Option<String>,
}

/// An inflected surface form of a lemma.
///
/// The morphological tags are short service codes, e.g. aspect `P`/`S`/`C`,
/// gender `m`/`f`, voice `a`/`p`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordForm {
    pub form: String,
    pub phonetic: Option<String>,
    pub dialect: Option<String>,
    pub audio: Option<String>,
    pub aspect: Option<String>,
    #[serde(alias = "definition")]
    pub definiteness: Option<String>,
    pub gender: Option<String>,
    pub number: Option<String>,
    pub person: Option<String>,
    pub voice: Option<String>,
    #[serde(alias = "is_nasab", default, deserialize_with = "null_as_default")]
    pub is_nasab: bool,
    #[serde(alias = "is_small", default, deserialize_with = "null_as_default")]
    pub is_small: bool,
}

/// Structural kind of a lemma.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LemmaType {
    /// مفردة
    #[serde(rename = "singleWord")]
    SingleWord,
    /// مركب اسمي
    #[serde(rename = "MWE")]
    Mwe,
    /// مركب وصفي
    #[serde(rename = "wasf")]
    Wasf,
    /// مركب ظرفي
    #[serde(rename = "thrf")]
    Thrf,
    /// مركب فعلي
    #[serde(rename = "phraseVerb")]
    PhraseVerb,
    /// مركب حرفي
    #[serde(rename = "compound")]
    Compound,
    /// مورفيم مقيد
    #[serde(rename = "morphim")]
    Morphim,
    #[serde(rename = "symbol")]
    Symbol,
    #[serde(rename = "short")]
    Short,
    /// علامة ترقيم
    #[serde(rename = "mark")]
    Mark,
    /// مركب إشاري
    #[serde(rename = "SgnCom")]
    SgnCom,
    /// مركب موصولي
    #[serde(rename = "MslCom")]
    MslCom,
    /// مركب ضميري
    #[serde(rename = "ProCom")]
    ProCom,
    /// مركب انفعالي
    #[serde(rename = "infc")]
    Infc,
    #[serde(rename = "nmbr")]
    Nmbr,
}

impl LemmaType {
    pub fn as_str(self) -> &'static str {
        match self {
            LemmaType::SingleWord => "singleWord",
            LemmaType::Mwe => "MWE",
            LemmaType::Wasf => "wasf",
            LemmaType::Thrf => "thrf",
            LemmaType::PhraseVerb => "phraseVerb",
            LemmaType::Compound => "compound",
            LemmaType::Morphim => "morphim",
            LemmaType::Symbol => "symbol",
            LemmaType::Short => "short",
            LemmaType::Mark => "mark",
            LemmaType::SgnCom => "SgnCom",
            LemmaType::MslCom => "MslCom",
            LemmaType::ProCom => "ProCom",
            LemmaType::Infc => "infc",
            LemmaType::Nmbr => "nmbr",
        }
    }
}

impl fmt::Display for LemmaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a usage example.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExampleType {
    #[serde(rename = "quote")]
    Quote,
    #[serde(rename = "example")]
    Example,
    #[serde(rename = "idiom")]
    Idiom,
    #[serde(rename = "proverb")]
    Proverb,
    #[serde(rename = "saying")]
    Saying,
    #[serde(rename = "quranic")]
    Quranic,
    #[serde(rename = "Quranicreading")]
    QuranicReading,
    #[serde(rename = "hadith")]
    Hadith,
    #[serde(rename = "other")]
    Other,
}

impl ExampleType {
    pub fn as_str(self) -> &'static str {
        match self {
            ExampleType::Quote => "quote",
            ExampleType::Example => "example",
            ExampleType::Idiom => "idiom",
            ExampleType::Proverb => "proverb",
            ExampleType::Saying => "saying",
            ExampleType::Quranic => "quranic",
            ExampleType::QuranicReading => "Quranicreading",
            ExampleType::Hadith => "hadith",
            ExampleType::Other => "other",
        }
    }
}

impl fmt::Display for ExampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! part_of_speech {
    ($($(#[$meta:meta])* $variant:ident => $wire:literal,)*) => {
        /// Part of speech code.
        ///
        /// Codes the client does not know decode into `Unrecognized` so a new
        /// service-side code never fails a whole response.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum PartOfSpeech {
            $($(#[$meta])* $variant,)*
            Unrecognized(String),
        }

        impl PartOfSpeech {
            /// Wire value of the code.
            pub fn as_str(&self) -> &str {
                match self {
                    $(PartOfSpeech::$variant => $wire,)*
                    PartOfSpeech::Unrecognized(raw) => raw,
                }
            }

            pub fn from_wire(raw: &str) -> Self {
                match raw {
                    $($wire => PartOfSpeech::$variant,)*
                    other => PartOfSpeech::Unrecognized(other.to_string()),
                }
            }
        }
    };
}

part_of_speech! {
    /// اسم
    Noun => "N",
    /// فعل
    Verb => "V",
    /// صفة
    Adjective => "A",
    /// ظرف
    Adverb => "D",
    /// ضمير
    Pronoun => "P",
    /// انفعال
    Interjection => "I",
    /// أداة
    Particle => "R",
    ConcreteNoun => "NC",
    AbstractNoun => "NA",
    PlaceNoun => "NL",
    TimeNoun => "NT",
    InstrumentNoun => "NM",
    CollectiveNoun => "NG",
    FormNoun => "NF",
    InstanceNoun => "NO",
    VagueNoun => "NI",
    IntransitiveVerb => "VI",
    TransitiveVerb => "VT",
    RelativeAdjective => "AR",
    ActiveParticiple => "AS",
    PassiveParticiple => "AO",
    /// أفعل التفضيل
    Comparative => "AP",
    /// صفة مشبهة
    Assimilated => "AA",
    /// صيغة مبالغة
    Intensifier => "AX",
    PersonalPronoun => "PP",
    DemonstrativePronoun => "PD",
    RelativePronoun => "PR",
    PlaceAdverb => "DL",
    TimeAdverb => "DT",
    VerbalInterjection => "IV",
    SoundInterjection => "IS",
    Exclamation => "II",
    Dispraise => "IF",
    Praise => "IP",
}

impl PartOfSpeech {
    pub fn is_recognized(&self) -> bool {
        !matches!(self, PartOfSpeech::Unrecognized(_))
    }
}

impl From<String> for PartOfSpeech {
    fn from(raw: String) -> Self {
        match PartOfSpeech::from_wire(&raw) {
            PartOfSpeech::Unrecognized(_) => PartOfSpeech::Unrecognized(raw),
            known => known,
        }
    }
}

impl From<PartOfSpeech> for String {
    fn from(pos: PartOfSpeech) -> Self {
        match pos {
            PartOfSpeech::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_status() -> String {
    DEFAULT_LEXICON_STATUS.to_string()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn status_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|status| status.unwrap_or_else(default_status))
}

/// Optional timestamps written as RFC 3339. Reading also accepts other
/// ISO 8601 shapes, offset-less ones taken as UTC, and yields `None` for
/// anything unparseable so one odd value never fails a whole listing.
mod lenient_timestamp {
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;
    use time::format_description::well_known::{Iso8601, Rfc3339};
    use time::macros::format_description;
    use time::{Date, OffsetDateTime, PrimitiveDateTime};

    pub fn serialize<S>(value: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        time::serde::rfc3339::option::serialize(value, serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(Value::as_str).and_then(parse))
    }

    fn parse(raw: &str) -> Option<OffsetDateTime> {
        let raw = raw.trim();
        OffsetDateTime::parse(raw, &Rfc3339)
            .or_else(|_| OffsetDateTime::parse(raw, &Iso8601::DEFAULT))
            .or_else(|_| PrimitiveDateTime::parse(raw, &Iso8601::DEFAULT).map(|dt| dt.assume_utc()))
            .or_else(|_| {
                PrimitiveDateTime::parse(
                    raw,
                    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
                )
                .map(|dt| dt.assume_utc())
            })
            .or_else(|_| {
                Date::parse(raw, format_description!("[year]-[month]-[day]"))
                    .map(|date| date.midnight().assume_utc())
            })
            .ok()
    }
}

fn non_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    if value.trim().is_empty() {
        return Err(serde::de::Error::invalid_value(
            serde::de::Unexpected::Str(&value),
            &"a non-empty string",
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn search_result_json() -> serde_json::Value {
        json!({
            "lexicalEntryId": "123",
            "lexiconId": "456",
            "lexiconName": "Test Lexicon",
            "lemma": "مُحَرِّك",
            "lemmaType": "singleWord",
            "pattern": "مُفَعِّل",
            "pos": "N",
            "nonDiacriticsLemma": "محرك",
            "lemmaLanguage": "ar",
            "senses": []
        })
    }

    #[test]
    fn lexicon_entry_defaults() {
        let entry: LexiconEntry =
            serde_json::from_str(r#"{"id":"123","name":"Test Lexicon","isPublished":true}"#).unwrap();
        assert_eq!(entry.id, "123");
        assert_eq!(entry.name, "Test Lexicon");
        assert!(entry.is_published);
        assert!(!entry.is_public);
        assert_eq!(entry.status, "DRAFT");
        assert!(entry.domain_ids.is_empty());
        assert!(entry.title.is_none());
        assert!(entry.created_at.is_none());
    }

    #[test]
    fn lexicon_entry_accepts_snake_case_and_timestamps() {
        let entry: LexiconEntry = serde_json::from_value(json!({
            "id": "1",
            "name": "Contemporary",
            "domain_ids": ["d1", "d2"],
            "is_public": true,
            "status": "PUBLISHED",
            "created_at": "2024-01-02T03:04:05Z",
            "publisherName": "KSAA"
        }))
        .unwrap();
        assert_eq!(entry.domain_ids, vec!["d1", "d2"]);
        assert!(entry.is_public);
        assert_eq!(entry.status, "PUBLISHED");
        assert_eq!(entry.publisher_name.as_deref(), Some("KSAA"));
        assert_eq!(entry.created_at.unwrap().year(), 2024);
    }

    #[test]
    fn lexicon_entry_timestamps_without_offset_or_time() {
        let entry: LexiconEntry = serde_json::from_value(json!({
            "id": "1",
            "name": "a",
            "createdAt": "2024-01-15T08:30:00",
            "updatedAt": "2024-01-15"
        }))
        .unwrap();
        let created = entry.created_at.unwrap();
        assert_eq!(created.offset(), time::UtcOffset::UTC);
        assert_eq!((created.hour(), created.minute()), (8, 30));
        let updated = entry.updated_at.unwrap();
        assert_eq!(updated.date(), created.date());
        assert_eq!(updated.hour(), 0);
    }

    #[test]
    fn lexicon_entry_unparseable_timestamp_is_dropped() {
        let entries: Vec<LexiconEntry> = serde_json::from_value(json!([
            {"id": "1", "name": "a", "createdAt": "last tuesday", "updatedAt": 1705307400},
            {"id": "2", "name": "b", "createdAt": "2024-01-15T08:30:00.123Z"}
        ]))
        .unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].created_at.is_none());
        assert!(entries[0].updated_at.is_none());
        assert_eq!(entries[1].created_at.unwrap().millisecond(), 123);
    }

    #[test]
    fn lexicon_entry_timestamp_serializes_as_rfc3339() {
        let entry: LexiconEntry = serde_json::from_value(json!({
            "id": "1",
            "name": "a",
            "createdAt": "2024-01-15 08:30:00"
        }))
        .unwrap();
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["createdAt"], "2024-01-15T08:30:00Z");
        assert!(value["updatedAt"].is_null());
    }

    #[test]
    fn lexicon_entry_null_status_defaults() {
        let entry: LexiconEntry =
            serde_json::from_str(r#"{"id":"1","name":"n","status":null,"domainIds":null}"#).unwrap();
        assert_eq!(entry.status, "DRAFT");
        assert!(entry.domain_ids.is_empty());
    }

    #[test]
    fn lexicon_entry_rejects_missing_or_empty_id() {
        let missing = serde_json::from_str::<LexiconEntry>(r#"{"name":"n"}"#).unwrap_err();
        assert!(missing.to_string().contains("missing field `id`"));

        let empty = serde_json::from_str::<LexiconEntry>(r#"{"id":" ","name":"n"}"#);
        assert!(empty.is_err());
    }

    #[test]
    fn search_result_minimal() {
        let result: SearchResult = serde_json::from_value(search_result_json()).unwrap();
        assert_eq!(result.lexical_entry_id, "123");
        assert_eq!(result.lemma_type, LemmaType::SingleWord);
        assert_eq!(result.pos, PartOfSpeech::Noun);
        assert!(result.senses.is_empty());
        assert!(result.root.is_empty());
        assert!(result.word_forms.is_empty());
        assert!(result.lemma_audio.is_none());
        assert!(!result.is_synonym);
        assert!(result.sort_group_order.is_none());
    }

    #[test]
    fn search_result_accepts_snake_case() {
        let result: SearchResult = serde_json::from_value(json!({
            "lexical_entry_id": "123",
            "lexicon_id": "456",
            "lexicon_name": "Test Lexicon",
            "lemma": "محرك",
            "lemma_type": "singleWord",
            "pattern": "فاعل",
            "pos": "N",
            "non_diacritics_lemma": "محرك",
            "lemma_language": "ar",
            "lemma_audio": null,
            "senses": [],
            "is_word_form_match": true,
            "sort_group_order": 2
        }))
        .unwrap();
        assert_eq!(result.lexicon_name, "Test Lexicon");
        assert!(result.is_word_form_match);
        assert_eq!(result.sort_group_order, Some(2));
    }

    #[test]
    fn search_result_missing_required_field_names_it() {
        let mut value = search_result_json();
        value.as_object_mut().unwrap().remove("lemma");
        let err = serde_json::from_value::<SearchResult>(value).unwrap_err();
        assert!(err.to_string().contains("missing field `lemma`"), "{err}");
    }

    #[test]
    fn search_result_ignores_unknown_fields() {
        let mut value = search_result_json();
        value["somethingNew"] = json!({"nested": true});
        assert!(serde_json::from_value::<SearchResult>(value).is_ok());
    }

    #[test]
    fn nested_senses_decode() {
        let mut value = search_result_json();
        value["senses"] = json!([{
            "definition": "آلة تحول الطاقة إلى حركة",
            "translations": [{"word": "engine", "language": "en", "languageLabel": "English"}],
            "examples": [{"word": "محرك السيارة", "type": "example"}],
            "relations": [{"type": "synonym", "targetId": "789"}],
            "contexts": null
        }]);
        value["wordForms"] = json!([{"form": "محركات", "number": "3", "definition": "i", "isSmall": true}]);
        value["root"] = json!(["ح", "ر", "ك"]);

        let result: SearchResult = serde_json::from_value(value).unwrap();
        let sense = &result.senses[0];
        assert_eq!(sense.translations[0].language_label, "English");
        assert_eq!(sense.examples[0].kind, ExampleType::Example);
        assert_eq!(sense.relations[0]["targetId"], "789");
        assert!(sense.contexts.is_empty());
        assert_eq!(result.word_forms[0].definiteness.as_deref(), Some("i"));
        assert!(result.word_forms[0].is_small);
        assert_eq!(result.root.len(), 3);
    }

    #[test]
    fn unknown_part_of_speech_is_kept_raw() {
        let mut value = search_result_json();
        value["pos"] = json!("ZZ");
        let result: SearchResult = serde_json::from_value(value).unwrap();
        assert_eq!(result.pos, PartOfSpeech::Unrecognized("ZZ".to_string()));
        assert!(!result.pos.is_recognized());
        assert_eq!(serde_json::to_value(&result.pos).unwrap(), json!("ZZ"));
    }

    #[test]
    fn fine_grained_part_of_speech() {
        let pos: PartOfSpeech = serde_json::from_str(r#""VT""#).unwrap();
        assert_eq!(pos, PartOfSpeech::TransitiveVerb);
        assert_eq!(pos.to_string(), "VT");
    }

    #[test]
    fn unknown_lemma_type_is_rejected() {
        let mut value = search_result_json();
        value["lemmaType"] = json!("sentence");
        assert!(serde_json::from_value::<SearchResult>(value).is_err());
    }

    #[test]
    fn enum_wire_values() {
        assert_eq!(serde_json::to_value(LemmaType::Mwe).unwrap(), json!("MWE"));
        assert_eq!(LemmaType::SgnCom.to_string(), "SgnCom");
        assert_eq!(
            serde_json::to_value(ExampleType::QuranicReading).unwrap(),
            json!("Quranicreading")
        );
        let kind: ExampleType = serde_json::from_str(r#""hadith""#).unwrap();
        assert_eq!(kind, ExampleType::Hadith);
    }

    #[test]
    fn records_serialize_camel_case() {
        let result: SearchResult = serde_json::from_value(search_result_json()).unwrap();
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["lexicalEntryId"], "123");
        assert_eq!(value["nonDiacriticsLemma"], "محرك");
        assert!(value.get("lexical_entry_id").is_none());
    }
}
