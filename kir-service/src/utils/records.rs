//! Response shaping for stored documents.
//!
//! Stored documents carry driver types (`ObjectId`, BSON datetimes) that have
//! no natural JSON form. Clients get the identifier as a hex string under `id`
//! and datetimes as RFC 3339 strings; everything else uses relaxed extended JSON.

use mongodb::bson::{Bson, Document};
use serde_json::{Map, Value};

pub fn to_json_record(document: Document) -> Value {
    let mut record = Map::new();
    let mut id = None;

    for (key, value) in document {
        if key == "_id" {
            id = Some(bson_to_json(value));
        } else {
            record.insert(key, bson_to_json(value));
        }
    }

    if let Some(id) = id {
        record.insert("id".to_string(), id);
    }

    Value::Object(record)
}

pub fn to_json_records(documents: Vec<Document>) -> Vec<Value> {
    documents.into_iter().map(to_json_record).collect()
}

fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(s) => Value::String(s),
            Err(_) => Bson::DateTime(dt).into_relaxed_extjson(),
        },
        Bson::Document(doc) => Value::Object(
            doc.into_iter()
                .map(|(k, v)| (k, bson_to_json(v)))
                .collect(),
        ),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}
