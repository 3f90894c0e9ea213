//! [`Inspect`] for standard library types.

use super::{Inspect, Mapping, Sequence, TypeDescriptor, Value};
use std::borrow::Cow;
use std::cell::OnceCell;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::BuildHasher;
use std::rc::Rc;
use std::sync::Arc;

macro_rules! inspect_signed {
    ($($ty:ty),*) => {
        $(
            impl Inspect for $ty {
                fn inspect(&self) -> Value<'_> {
                    Value::Int(*self as i64)
                }
            }
        )*
    };
}

macro_rules! inspect_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Inspect for $ty {
                fn inspect(&self) -> Value<'_> {
                    Value::Uint(*self as u64)
                }
            }
        )*
    };
}

inspect_signed!(i8, i16, i32, i64, isize);
inspect_unsigned!(u8, u16, u32, u64, usize);

impl Inspect for f32 {
    fn inspect(&self) -> Value<'_> {
        Value::Float(*self as f64)
    }
}

impl Inspect for f64 {
    fn inspect(&self) -> Value<'_> {
        Value::Float(*self)
    }
}

impl Inspect for bool {
    fn inspect(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl Inspect for str {
    fn inspect(&self) -> Value<'_> {
        Value::Str(self)
    }
}

impl Inspect for String {
    fn inspect(&self) -> Value<'_> {
        Value::Str(self.as_str())
    }
}

impl Inspect for Cow<'_, str> {
    fn inspect(&self) -> Value<'_> {
        Value::Str(self.as_ref())
    }
}

// Indirections.

impl<T: Inspect> Inspect for Option<T> {
    fn inspect(&self) -> Value<'_> {
        match self {
            Some(inner) => inner.inspect(),
            None => Value::Nil,
        }
    }

    fn record_descriptor() -> Option<TypeDescriptor> {
        T::record_descriptor()
    }
}

impl<T: Inspect> Inspect for OnceCell<T> {
    fn inspect(&self) -> Value<'_> {
        match self.get() {
            Some(inner) => inner.inspect(),
            None => Value::Nil,
        }
    }

    fn record_descriptor() -> Option<TypeDescriptor> {
        T::record_descriptor()
    }
}

macro_rules! inspect_pointer {
    ($($ptr:ident),*) => {
        $(
            impl<T: Inspect + ?Sized> Inspect for $ptr<T> {
                fn inspect(&self) -> Value<'_> {
                    (**self).inspect()
                }

                fn record_descriptor() -> Option<TypeDescriptor> {
                    T::record_descriptor()
                }
            }
        )*
    };
}

inspect_pointer!(Box, Rc, Arc);

impl<T: Inspect + ?Sized> Inspect for &T {
    fn inspect(&self) -> Value<'_> {
        (**self).inspect()
    }

    fn record_descriptor() -> Option<TypeDescriptor> {
        T::record_descriptor()
    }
}

// Sequences.

impl<T: Inspect> Sequence for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn get(&self, index: usize) -> Value<'_> {
        self.as_slice().get(index).map_or(Value::Nil, |item| item.inspect())
    }
}

impl<T: Inspect> Inspect for Vec<T> {
    fn inspect(&self) -> Value<'_> {
        Value::Seq(self)
    }

    fn record_descriptor() -> Option<TypeDescriptor> {
        T::record_descriptor()
    }
}

impl<T: Inspect, const N: usize> Sequence for [T; N] {
    fn len(&self) -> usize {
        N
    }

    fn get(&self, index: usize) -> Value<'_> {
        self.as_slice().get(index).map_or(Value::Nil, |item| item.inspect())
    }
}

impl<T: Inspect, const N: usize> Inspect for [T; N] {
    fn inspect(&self) -> Value<'_> {
        Value::Seq(self)
    }

    fn record_descriptor() -> Option<TypeDescriptor> {
        T::record_descriptor()
    }
}

impl<T: Inspect> Sequence for VecDeque<T> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn get(&self, index: usize) -> Value<'_> {
        VecDeque::get(self, index).map_or(Value::Nil, |item| item.inspect())
    }
}

impl<T: Inspect> Inspect for VecDeque<T> {
    fn inspect(&self) -> Value<'_> {
        Value::Seq(self)
    }

    fn record_descriptor() -> Option<TypeDescriptor> {
        T::record_descriptor()
    }
}

// Maps. Keys never take part in validation, so they only need to be stored.

impl<K, V: Inspect, S: BuildHasher> Mapping for HashMap<K, V, S> {
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn values(&self) -> Box<dyn Iterator<Item = Value<'_>> + '_> {
        Box::new(HashMap::values(self).map(|value| value.inspect()))
    }
}

impl<K, V: Inspect, S: BuildHasher> Inspect for HashMap<K, V, S> {
    fn inspect(&self) -> Value<'_> {
        Value::Map(self)
    }

    fn record_descriptor() -> Option<TypeDescriptor> {
        V::record_descriptor()
    }
}

impl<K, V: Inspect> Mapping for BTreeMap<K, V> {
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn values(&self) -> Box<dyn Iterator<Item = Value<'_>> + '_> {
        Box::new(BTreeMap::values(self).map(|value| value.inspect()))
    }
}

impl<K, V: Inspect> Inspect for BTreeMap<K, V> {
    fn inspect(&self) -> Value<'_> {
        Value::Map(self)
    }

    fn record_descriptor() -> Option<TypeDescriptor> {
        V::record_descriptor()
    }
}
