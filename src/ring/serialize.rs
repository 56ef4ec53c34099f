use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::ring::{Element, Ring};

/// A ring is serialized as the sequence of its elements, from the head.
impl<K: Serialize, I: Serialize> Serialize for Ring<K, I> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

struct RingVisitor<K, I> {
    _marker: PhantomData<fn() -> Ring<K, I>>,
}

impl<'de, K: Deserialize<'de>, I: Deserialize<'de>> Visitor<'de> for RingVisitor<K, I> {
    type Value = Ring<K, I>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sequence of ring elements")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut ring = Ring::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(Element { key, info }) = seq.next_element()? {
            ring.push_back(key, info);
        }
        Ok(ring)
    }
}

impl<'de, K: Deserialize<'de>, I: Deserialize<'de>> Deserialize<'de> for Ring<K, I> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(RingVisitor {
            _marker: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::ring::tests::ring_eq;
    use crate::ring::{Ring, SplitPlan};
    use std::iter::FromIterator;

    #[test]
    fn ring_serde() {
        let mut ring = Ring::new();
        ring.push_back(2, "b".to_string());
        ring.push_front(1, "a".to_string());

        let json = serde_json::to_string(&ring).unwrap();
        assert_eq!(json, r#"[{"key":1,"info":"a"},{"key":2,"info":"b"}]"#);

        let parsed: Ring<i32, String> = serde_json::from_str(&json).unwrap();
        ring_eq(&parsed, vec![(1, "a".to_string()), (2, "b".to_string())]);
        assert_eq!(parsed, Ring::from_iter(vec![(1, "a".to_string()), (2, "b".to_string())]));
    }

    #[test]
    fn split_plan_serde() {
        let plan: SplitPlan = serde_json::from_str(r#"{"chunk":2,"repeats":3}"#).unwrap();
        assert_eq!(plan, SplitPlan::new(2, 3));
    }
}
