//! Material graph vocabulary

mod vocab;


pub use vocab::{
    course_of, Dimension, Predicate, Triple, UnknownDimension, UnknownPredicate, COURSE_CLASS,
    MATERIAL_CLASS,
};
