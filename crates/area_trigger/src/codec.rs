//! Tagged JSON records for volumes.
//!
//! Each volume encodes as a JSON object whose `"$typeString"` field names the
//! kind; the remaining fields are that kind's own:
//!
//! ```text
//! box                  { min: [x,y,z], max: [x,y,z] }
//! sphere               { center: [x,y,z], radius }
//! prism                { top, bottom, polygon: [[x,y], ..], alignment, isComplex }
//! union                { content: [record, ..], isComplex }
//! intersection         (same as union)
//! symmetricDifference  (same as union)
//! difference           { positive: record | null, negatives: [record, ..], isComplex }
//! ```
//!
//! Bounds are never stored; they are recomputed on decode. Decoding always
//! creates fresh handles, so identity shared between children is not
//! preserved.

use glam::{DVec2, DVec3};
use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::axis::Axis3;
use crate::error::CodecError;
use crate::volume::{
  BoundingVolume, BoxVolume, Difference, Intersection, Prism, SphereVolume, SymmetricDifference,
  Union, Volume, VolumeHandle,
};

/// Discriminator field carried by every record.
pub const TYPE_KEY: &str = "$typeString";

/// Every kind the codec understands.
pub const REGISTRY: [&str; 7] = [
  "box",
  "sphere",
  "prism",
  "union",
  "intersection",
  "difference",
  "symmetricDifference",
];

fn default_complex() -> bool {
  true
}

#[derive(Serialize, Deserialize)]
struct BoxRecord {
  min: DVec3,
  max: DVec3,
}

#[derive(Serialize, Deserialize)]
struct SphereRecord {
  center: DVec3,
  radius: f64,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrismRecord {
  top: f64,
  bottom: f64,
  polygon: Vec<DVec2>,
  #[serde(default)]
  alignment: Axis3,
  #[serde(default = "default_complex")]
  is_complex: bool,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupRecord {
  #[serde(default)]
  content: Vec<VolumeHandle>,
  #[serde(default = "default_complex")]
  is_complex: bool,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DifferenceRecord {
  #[serde(default)]
  positive: Option<VolumeHandle>,
  #[serde(default)]
  negatives: Vec<VolumeHandle>,
  #[serde(default = "default_complex")]
  is_complex: bool,
}

/// Encode a volume as a tagged record.
pub fn encode(volume: &Volume) -> Result<Value, CodecError> {
  let fields = match volume {
    Volume::Box(b) => serde_json::to_value(BoxRecord {
      min: b.min(),
      max: b.max(),
    })?,
    Volume::Sphere(s) => serde_json::to_value(SphereRecord {
      center: s.center(),
      radius: s.radius(),
    })?,
    Volume::Prism(p) => serde_json::to_value(PrismRecord {
      top: p.top(),
      bottom: p.bottom(),
      polygon: p.polygon().vertices().to_vec(),
      alignment: p.alignment(),
      is_complex: p.is_expensive(),
    })?,
    Volume::Union(g) => group_fields(g.contents(), g.is_expensive())?,
    Volume::Intersection(g) => group_fields(g.contents(), g.is_expensive())?,
    Volume::SymmetricDifference(g) => group_fields(g.contents(), g.is_expensive())?,
    Volume::Difference(d) => serde_json::to_value(DifferenceRecord {
      positive: d.positive().cloned(),
      negatives: d.negatives().to_vec(),
      is_complex: d.is_expensive(),
    })?,
  };

  let mut record = match fields {
    Value::Object(map) => map,
    _ => Map::new(),
  };
  record.insert(TYPE_KEY.to_owned(), Value::String(volume.kind_name().to_owned()));
  Ok(Value::Object(record))
}

fn group_fields(content: &[VolumeHandle], is_complex: bool) -> Result<Value, serde_json::Error> {
  serde_json::to_value(GroupRecord {
    content: content.to_vec(),
    is_complex,
  })
}

/// Decode a tagged record into a fresh handle.
pub fn decode(value: Value) -> Result<VolumeHandle, CodecError> {
  let Value::Object(mut record) = value else {
    return Err(CodecError::MissingType(TYPE_KEY));
  };
  let tag = match record.remove(TYPE_KEY) {
    Some(Value::String(tag)) => tag,
    _ => return Err(CodecError::MissingType(TYPE_KEY)),
  };
  let fields = Value::Object(record);

  let volume: Volume = match tag.as_str() {
    "box" => {
      let r: BoxRecord = serde_json::from_value(fields)?;
      BoxVolume::new(r.min, r.max).into()
    }
    "sphere" => {
      let r: SphereRecord = serde_json::from_value(fields)?;
      SphereVolume::new(r.center, r.radius).into()
    }
    "prism" => {
      let r: PrismRecord = serde_json::from_value(fields)?;
      Prism::new(r.top, r.bottom, r.polygon, r.alignment)?
        .with_expensive(r.is_complex)
        .into()
    }
    "union" => {
      let r: GroupRecord = serde_json::from_value(fields)?;
      Union::from_content(r.content, r.is_complex).into()
    }
    "intersection" => {
      let r: GroupRecord = serde_json::from_value(fields)?;
      Intersection::from_content(r.content, r.is_complex).into()
    }
    "symmetricDifference" => {
      let r: GroupRecord = serde_json::from_value(fields)?;
      SymmetricDifference::from_content(r.content, r.is_complex).into()
    }
    "difference" => {
      let r: DifferenceRecord = serde_json::from_value(fields)?;
      Difference::from_parts(r.positive, r.negatives, r.is_complex).into()
    }
    _ => return Err(CodecError::UnsupportedType(tag)),
  };

  Ok(VolumeHandle::new(volume))
}

/// Encode straight to a JSON string.
pub fn to_string(volume: &Volume) -> Result<String, CodecError> {
  Ok(serde_json::to_string(&encode(volume)?)?)
}

/// Decode from a JSON string.
pub fn from_str(json: &str) -> Result<VolumeHandle, CodecError> {
  decode(serde_json::from_str(json)?)
}

impl Serialize for VolumeHandle {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    encode(self.volume())
      .map_err(ser::Error::custom)?
      .serialize(serializer)
  }
}

impl<'de> Deserialize<'de> for VolumeHandle {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let value = Value::deserialize(deserializer)?;
    decode(value).map_err(de::Error::custom)
  }
}

#[cfg(test)]
#[path = "codec_test.rs"]
mod codec_test;
