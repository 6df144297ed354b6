use std::fmt;

/// Prefix shared by every resource the builder emits.
pub const SVG_DATA_URI_PREFIX: &str = "data:image/svg+xml;utf8,";

pub(crate) fn svg_data_uri(svg: &str) -> String {
    let encoded = urlencoding::encode(svg);
    let mut uri = String::with_capacity(SVG_DATA_URI_PREFIX.len() + encoded.len());
    uri.push_str(SVG_DATA_URI_PREFIX);
    uri.push_str(&encoded);
    uri
}

/// Recovers the SVG source embedded in a `data:image/svg+xml;utf8,` URI.
///
/// A trailing `#fragment` (filter reference) is ignored. Returns `None` for any other URI.
pub fn decode_svg_data_uri(uri: &str) -> Option<String> {
    let body = uri.strip_prefix(SVG_DATA_URI_PREFIX)?;
    let body = body.split_once('#').map_or(body, |(svg, _)| svg);
    urlencoding::decode(body).ok().map(|s| s.into_owned())
}

/// Procedurally generated displacement image, embedded as a data URI.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct DisplacementMap(String);

/// Filter chain referencing an embedded [`DisplacementMap`], as a data URI with a `#displace`
/// fragment.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct CompositeFilter(String);

macro_rules! data_uri_newtype {
    ($ty:ident) => {
        impl $ty {
            pub(crate) fn from_uri(uri: String) -> Self {
                Self(uri)
            }

            pub fn as_uri(&self) -> &str {
                &self.0
            }

            pub fn into_uri(self) -> String {
                self.0
            }

            /// Decoded SVG source of this resource.
            pub fn svg_source(&self) -> Option<String> {
                decode_svg_data_uri(&self.0)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

data_uri_newtype!(DisplacementMap);
data_uri_newtype!(CompositeFilter);
