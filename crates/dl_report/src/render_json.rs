//! JSON renderer: serialize the model as-is (field order follows the struct
//! layout; callers wanting canonical bytes route through `dl_io`).

use crate::{ReportError, ReportModel};

pub fn render_json(model: &ReportModel) -> Result<String, ReportError> {
    serde_json::to_string(model).map_err(|_| ReportError::MissingField("json_serialize"))
}
