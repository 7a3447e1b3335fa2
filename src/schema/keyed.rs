//! Insertion-ordered string-keyed map.
//!
//! Content files are authored in the order sections should appear, and
//! per-language or per-environment tables read best in the order they were
//! written. `KeyedMap` keeps that order through a load/serialize round trip.

use indexmap::IndexMap;

pub type KeyedMap<V> = IndexMap<String, V>;
