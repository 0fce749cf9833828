use wiz_store::SessionRecord;

/// Shallow merge: fields in `patch` overwrite same-named fields in `base`,
/// fields absent from `patch` are preserved. Values are replaced wholesale;
/// nested objects are not recursed into.
pub fn shallow_merge(base: &mut SessionRecord, patch: SessionRecord) {
    for (key, value) in patch {
        base.insert(key, value);
    }
}
