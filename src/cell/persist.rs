use super::ObservableCell;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serializes as the bare current value. Listeners are not persisted.
impl<T: Serialize> Serialize for ObservableCell<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.with_value(|value| value.serialize(serializer))
    }
}

/// Deserializes into a live cell with no listeners, the default comparison
/// and a `T::default()` reset value.
impl<'de, T> Deserialize<'de> for ObservableCell<T>
where
    T: Deserialize<'de> + Clone + PartialEq + Default + 'static,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(ObservableCell::new)
    }
}
