use serde::ser::SerializeStruct;

use super::Array;

/// An `Array` is written as `{ dims, items }`, with the items in row-major
/// order.
impl<T: serde::Serialize> serde::Serialize for Array<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Array", 2)?;
        state.serialize_field("dims", self.dims())?;
        state.serialize_field("items", self.as_ref())?;
        state.end()
    }
}

/// The wire form, before the item count is checked against the dims.
#[derive(serde::Deserialize)]
#[serde(rename = "Array")]
struct Raw<T> {
    dims: Vec<usize>,
    items: Vec<T>,
}

impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for Array<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error> where
        D: serde::Deserializer<'de>,
    {
        let Raw {dims, items} = <Raw<T> as serde::Deserialize>::deserialize(deserializer)?;
        Array::try_new(dims, items).map_err(serde::de::Error::custom)
    }
}

// ----------------------------------------------------------------------------
