//! Response envelope rendering (JSON or NetworkAPI XML).
//!
//! Resource listings answer in JSON unless the client asks for XML through
//! `Accept`. XML documents use the `<networkapi versao="1.0">` root; a list
//! repeats its element name once per item.

use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde_json::{Map, Value};

use crate::app::errors::ApiError;

const XML_CONTENT_TYPE: &str = "application/xml; charset=utf-8";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Json,
    Xml,
}

impl ResponseFormat {
    /// XML when `Accept` names an XML media type, JSON otherwise.
    pub fn negotiate(headers: &HeaderMap) -> Self {
        let wants_xml = headers
            .get_all(header::ACCEPT)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(','))
            .map(|v| v.split(';').next().unwrap_or_default().trim())
            .any(|media| media.eq_ignore_ascii_case("application/xml") || media.eq_ignore_ascii_case("text/xml"));

        if wants_xml { Self::Xml } else { Self::Json }
    }
}

/// Render a `{key: value}` envelope in the requested format.
pub fn render(format: ResponseFormat, key: &str, value: Value) -> Result<Response, ApiError> {
    let mut envelope = Map::new();
    envelope.insert(key.to_string(), value);

    match format {
        ResponseFormat::Json => Ok(Json(Value::Object(envelope)).into_response()),
        ResponseFormat::Xml => {
            let body = to_networkapi_xml(&envelope).map_err(ApiError::unexpected)?;
            Ok((
                [(header::CONTENT_TYPE, HeaderValue::from_static(XML_CONTENT_TYPE))],
                body,
            )
                .into_response())
        }
    }
}

/// Serialize a map under the `<networkapi versao="1.0">` root element.
pub fn to_networkapi_xml(map: &Map<String, Value>) -> anyhow::Result<String> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("networkapi");
    root.push_attribute(("versao", "1.0"));
    writer.write_event(Event::Start(root))?;
    for (name, value) in map {
        write_value(&mut writer, name, value)?;
    }
    writer.write_event(Event::End(BytesEnd::new("networkapi")))?;

    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_value(writer: &mut Writer<Vec<u8>>, name: &str, value: &Value) -> anyhow::Result<()> {
    match value {
        Value::Array(items) => {
            for item in items {
                write_value(writer, name, item)?;
            }
        }
        Value::Object(fields) => {
            writer.write_event(Event::Start(BytesStart::new(name)))?;
            for (field, inner) in fields {
                write_value(writer, field, inner)?;
            }
            writer.write_event(Event::End(BytesEnd::new(name)))?;
        }
        Value::Null => {
            writer.write_event(Event::Empty(BytesStart::new(name)))?;
        }
        scalar => {
            let text = match scalar {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            writer.write_event(Event::Start(BytesStart::new(name)))?;
            writer.write_event(Event::Text(BytesText::new(&text)))?;
            writer.write_event(Event::End(BytesEnd::new(name)))?;
        }
    }

    Ok(())
}
