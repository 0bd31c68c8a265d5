//! Record types and instances.
//!
//! Records are the structured-object analog of a dataclass: a shared
//! `RecordType` descriptor plus per-instance field values in declaration
//! order. The descriptor is the explicit reflection capability the engine
//! consumes: instance tests and supertype tests walk the parent chain by
//! pointer identity, so two descriptors with the same name are still two
//! distinct types.

use super::Value;
use crate::errors::{record_arity_mismatch, MatchError};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Type descriptor for record values.
#[derive(Debug)]
pub struct RecordType {
    name: String,
    parent: Option<Arc<RecordType>>,
    fields: Vec<String>,
}

impl RecordType {
    /// Declare a new root record type.
    pub fn new(name: impl Into<String>, fields: Vec<&str>) -> Arc<Self> {
        Arc::new(RecordType {
            name: name.into(),
            parent: None,
            fields: fields.into_iter().map(str::to_string).collect(),
        })
    }

    /// Declare a record type deriving from a parent type.
    ///
    /// `fields` is the full field list of the subtype, not a delta.
    pub fn with_parent(
        name: impl Into<String>,
        fields: Vec<&str>,
        parent: &Arc<RecordType>,
    ) -> Arc<Self> {
        Arc::new(RecordType {
            name: name.into(),
            parent: Some(Arc::clone(parent)),
            fields: fields.into_iter().map(str::to_string).collect(),
        })
    }

    /// Type name, for diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field names in declaration order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Whether `self` is `other` or derives from it, transitively.
    pub fn is_subtype_of(self: &Arc<Self>, other: &Arc<RecordType>) -> bool {
        let mut current = Some(self);
        while let Some(ty) = current {
            if Arc::ptr_eq(ty, other) {
                return true;
            }
            current = ty.parent.as_ref();
        }
        false
    }
}

/// Record instance: a type descriptor plus field values in layout order.
#[derive(Clone, Debug)]
pub struct RecordValue {
    ty: Arc<RecordType>,
    values: Arc<Vec<Value>>,
}

impl RecordValue {
    /// Create an instance of `ty` from field values in declaration order.
    pub fn new(ty: &Arc<RecordType>, values: Vec<Value>) -> Result<Self, MatchError> {
        if values.len() != ty.fields().len() {
            return Err(record_arity_mismatch(
                ty.name(),
                ty.fields().len(),
                values.len(),
            ));
        }
        Ok(RecordValue {
            ty: Arc::clone(ty),
            values: Arc::new(values),
        })
    }

    /// The instance's type descriptor.
    pub fn record_type(&self) -> &Arc<RecordType> {
        &self.ty
    }

    /// Whether this instance's type is exactly `ty` (pointer identity).
    pub fn is_exactly(&self, ty: &Arc<RecordType>) -> bool {
        Arc::ptr_eq(&self.ty, ty)
    }

    /// Whether this instance's type is `ty` or a subtype of it.
    pub fn is_instance_of(&self, ty: &Arc<RecordType>) -> bool {
        self.ty.is_subtype_of(ty)
    }

    /// Field value by name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        let index = self.ty.fields().iter().position(|f| f == field)?;
        self.values.get(index)
    }

    /// Field values in declaration order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// `(name, value)` pairs in declaration order.
    pub fn fields_with_values(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.ty
            .fields()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }
}

impl fmt::Display for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.ty.name())?;
        for (i, (name, value)) in self.fields_with_values().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        write!(f, ")")
    }
}

impl PartialEq for RecordValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.ty, &other.ty) && self.values == other.values
    }
}

impl Eq for RecordValue {}

impl Hash for RecordValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ty.name.hash(state);
        for value in self.values.iter() {
            value.hash(state);
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;

    #[test]
    fn subtype_chain() {
        let pet = RecordType::new("Pet", vec![]);
        let dog = RecordType::with_parent("Dog", vec![], &pet);
        let cat = RecordType::with_parent("Cat", vec![], &pet);

        assert!(dog.is_subtype_of(&pet));
        assert!(cat.is_subtype_of(&pet));
        assert!(pet.is_subtype_of(&pet));
        assert!(!pet.is_subtype_of(&dog));
        assert!(!dog.is_subtype_of(&cat));
    }

    #[test]
    fn same_name_is_not_same_type() {
        let a = RecordType::new("Point", vec!["x", "y"]);
        let b = RecordType::new("Point", vec!["x", "y"]);
        let pa = RecordValue::new(&a, vec![Value::int(1), Value::int(2)]).unwrap();
        assert!(!pa.is_instance_of(&b));
    }

    #[test]
    fn field_access_and_arity() {
        let point = RecordType::new("Point", vec!["x", "y"]);
        let p = RecordValue::new(&point, vec![Value::int(1), Value::int(2)]).unwrap();
        assert_eq!(p.get("x"), Some(&Value::int(1)));
        assert_eq!(p.get("y"), Some(&Value::int(2)));
        assert_eq!(p.get("z"), None);

        assert!(RecordValue::new(&point, vec![Value::int(1)]).is_err());
    }
}
