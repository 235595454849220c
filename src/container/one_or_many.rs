use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrManyRepr<T> {
    Many(Vec<T>),
    One(T),
}

/// `deserialize_with` helper for ESS fields that hold either a single object
/// or an array of them. `null` decodes to an empty list.
pub fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Option::<OneOrManyRepr<T>>::deserialize(deserializer)? {
        Some(OneOrManyRepr::Many(items)) => items,
        Some(OneOrManyRepr::One(item)) => vec![item],
        None => Vec::new(),
    })
}
