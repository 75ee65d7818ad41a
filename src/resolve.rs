//! # Inheritance Resolution
//!
//! This module computes the order in which configurations are merged. Each
//! configuration may name a single parent via `inherits`, forming a strictly
//! linear chain. Chains are walked child-to-parent, then reversed so that the
//! most ancestral configuration is merged first and the requested one last.
//!
//! When several configurations are requested together, each chain is resolved
//! independently and the results are concatenated, deduplicated by first-seen
//! order: a configuration already applied by an earlier chain is never merged
//! again.
//!
//! Two failure modes exist, both fatal: an `inherits` reference (or the
//! requested name itself) absent from the catalog, and a chain that revisits
//! a name it has already walked through.

use std::collections::HashSet;

use crate::catalog::Catalog;
use crate::error::{Error, Result};

/// Resolve the inheritance chain for a single configuration.
///
/// Returns the chain ordered from least to most specific: the oldest ancestor
/// first and `name` itself last. A configuration with no `inherits` key
/// yields the one-element chain `[name]`.
///
/// # Errors
///
/// - `Error::UnknownConfiguration` if `name` or any ancestor is absent from
///   the catalog.
/// - `Error::InheritanceCycle` if the chain revisits a name, including a
///   configuration that inherits from itself.
pub fn resolve_chain(name: &str, catalog: &Catalog) -> Result<Vec<String>> {
    if !catalog.contains(name) {
        return Err(Error::UnknownConfiguration {
            name: name.to_string(),
        });
    }

    let mut chain = vec![name.to_string()];
    let mut visited: HashSet<String> = chain.iter().cloned().collect();

    loop {
        // The tail is always present in the catalog at this point.
        let tail = chain.last().map(String::as_str).unwrap_or(name);
        let parent = match catalog.get(tail).and_then(|spec| spec.inherits()) {
            Some(parent) => parent,
            None => break,
        };

        if visited.contains(parent) {
            return Err(Error::InheritanceCycle {
                name: parent.to_string(),
            });
        }
        if !catalog.contains(parent) {
            return Err(Error::UnknownConfiguration {
                name: parent.to_string(),
            });
        }

        visited.insert(parent.to_string());
        chain.push(parent.to_string());
    }

    chain.reverse();
    log::debug!("resolved chain for '{}': {:?}", name, chain);
    Ok(chain)
}

/// Compute the overall merge order for a set of requested configurations.
///
/// Each requested name's chain is resolved independently; the chains are then
/// concatenated preserving first-seen order, and a name that has already been
/// scheduled is never scheduled again.
///
/// # Errors
///
/// Propagates the errors of [`resolve_chain`].
pub fn merge_order(requested: &[String], catalog: &Catalog) -> Result<Vec<String>> {
    let mut order = Vec::new();
    let mut applied = HashSet::new();

    for name in requested {
        for link in resolve_chain(name, catalog)? {
            if applied.insert(link.clone()) {
                order.push(link);
            }
        }
    }

    log::debug!("merge order for {:?}: {:?}", requested, order);
    Ok(order)
}
