//! Flat records used to export the hierarchy as rows.

use serde_json::{Map, Value};

use super::BBox;

/// A flat mapping of field name to scalar value, in insertion order.
pub type Record = Map<String, Value>;

/// Insert the edge and center fields of a bounding box.
pub(crate) fn insert_bbox(record: &mut Record, bbox: &BBox) {
    record.insert("xl".into(), bbox.xl.into());
    record.insert("yt".into(), bbox.yt.into());
    record.insert("xr".into(), bbox.xr.into());
    record.insert("yb".into(), bbox.yb.into());
    record.insert("xc".into(), bbox.xc().into());
    record.insert("yc".into(), bbox.yc().into());
}

/// Copy every field of `source` into `target`, prefixing its name.
pub(crate) fn extend_prefixed(target: &mut Record, prefix: &str, source: Record) {
    for (key, value) in source {
        target.insert(format!("{}_{}", prefix, key), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_bbox_keeps_order() {
        let mut record = Record::new();
        insert_bbox(&mut record, &BBox::new(0.0, 0.0, 10.0, 4.0));
        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["xl", "yt", "xr", "yb", "xc", "yc"]);
        assert_eq!(record["xc"], 5.0);
    }

    #[test]
    fn test_extend_prefixed() {
        let mut source = Record::new();
        source.insert("id".into(), 3.into());

        let mut target = Record::new();
        extend_prefixed(&mut target, "line", source);
        assert_eq!(target["line_id"], 3);
    }
}
