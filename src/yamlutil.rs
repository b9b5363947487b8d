//! Conversion of multi-document YAML streams into JSON values.

use serde::Deserialize;
use serde_json::Value;

/// Decode a stream of YAML documents into a sequence of JSON values.
///
/// A document that fails to decode yields its error and ends the stream;
/// serde_yaml cannot advance past a broken document, so continuing would
/// yield the same error forever. An empty stream yields no documents.
pub fn yaml_documents_to_json(
    stream: &str,
) -> impl Iterator<Item = Result<Value, serde_yaml::Error>> + '_ {
    // serde_yaml hands empty input back as a single null document.
    let documents = if stream.trim().is_empty() { 0 } else { usize::MAX };
    serde_yaml::Deserializer::from_str(stream)
        .map(Value::deserialize)
        .scan(false, |failed, document| {
            if *failed {
                return None;
            }
            *failed = document.is_err();
            Some(document)
        })
        .take(documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_multiple_documents() {
        let stream = "name: one\n---\nname: two\n";
        let docs: Vec<_> = yaml_documents_to_json(stream)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0]["name"], "one");
        assert_eq!(docs[1]["name"], "two");
    }

    #[test]
    fn empty_stream_yields_nothing() {
        assert_eq!(yaml_documents_to_json("").count(), 0);
    }

    #[test]
    fn invalid_document_yields_an_error() {
        let stream = "name: [unterminated\n";
        let results: Vec<_> = yaml_documents_to_json(stream).collect();
        assert!(results.iter().any(|r| r.is_err()));
    }

    #[test]
    fn decode_error_ends_the_stream() {
        let stream = "name: ok\n---\nname: [unterminated\n---\nname: unreachable\n";
        let results: Vec<_> = yaml_documents_to_json(stream).take(5).collect();
        assert!(results.len() <= 2, "got {} documents", results.len());
        assert!(results.last().unwrap().is_err());
    }

    #[test]
    fn nested_structures_become_json_objects() {
        let stream = "resources:\n  - name: pods\n    namespaced: true\n";
        let docs: Vec<_> = yaml_documents_to_json(stream)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(docs[0]["resources"][0]["name"], "pods");
        assert_eq!(docs[0]["resources"][0]["namespaced"], true);
    }
}
