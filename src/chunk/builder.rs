//! Assembly of the user-object chunk tree from a resolved bundle.
//!
//! Tree layout:
//!
//! ```text
//! UserObject                      component header + icon
//! └── UserObject                  script body + code
//!     └── ParameterData           counts + per-slot kind ids
//!         ├── InputParam[i]
//!         └── OutputParam[i]
//! ```

use super::{ChunkNode, GuidSource, USER_OBJECT};
use crate::metadata::{ComponentMetadata, GhPythonSettings, ParamSpec};
use uuid::{Uuid, uuid};

/// Base type of a GhPython script component user object.
pub const GHPYTHON_SCRIPT_ID: Uuid = uuid!("410755b1-224a-4c1e-a407-bf32fb45ea7e");

/// Kind id recorded for every input slot.
pub const INPUT_PARAM_ID: Uuid = uuid!("84fa917c-1ed8-4db3-8be1-7bdc4a6495a2");

/// Kind id recorded for every output slot.
pub const OUTPUT_PARAM_ID: Uuid = uuid!("8ec86459-bf01-4409-baee-174d0d2b13d0");

/// Builds the full user-object tree for one component.
///
/// `code` is the already templated script. The root identity is the
/// authored `instanceGuid` when present; it and every parameter identity
/// are otherwise drawn from `guids`.
pub fn build_user_object(
    metadata: &ComponentMetadata,
    icon: &[u8],
    code: &str,
    guids: &mut impl GuidSource,
) -> ChunkNode {
    let instance_guid = metadata
        .instance_guid
        .unwrap_or_else(|| guids.next_guid());

    let mut root = ChunkNode::new(USER_OBJECT);
    root.set_guid("BaseID", GHPYTHON_SCRIPT_ID);
    root.set_string("Name", &metadata.name);
    root.set_string("NickName", &metadata.nickname);
    root.set_string("Description", &metadata.description);
    root.set_int32("Exposure", metadata.exposure);
    root.set_string("Category", &metadata.category);
    root.set_string("SubCategory", &metadata.subcategory);
    root.set_guid("InstanceGuid", instance_guid);
    root.set_byte_array("Icon", icon.to_vec());

    root.push_chunk(build_script_body(metadata, code, guids));
    root
}

fn build_script_body(
    metadata: &ComponentMetadata,
    code: &str,
    guids: &mut impl GuidSource,
) -> ChunkNode {
    let settings = &metadata.ghpython;

    let mut body = ChunkNode::new(USER_OBJECT);
    body.set_string("Description", &metadata.description);
    body.set_boolean("HideOutput", settings.hide_output);
    body.set_boolean("HideInput", settings.hide_input);
    body.set_boolean("IsAdvancedMode", settings.is_advanced_mode);
    body.set_int32("IconDisplay", settings.icon_display);
    body.set_string("Name", &metadata.name);
    body.set_string("NickName", &metadata.nickname);
    body.set_boolean("MarshalOutGuids", settings.marshal_out_guids);
    body.set_string("CodeInput", code);

    body.push_chunk(build_parameter_data(settings, guids));
    body
}

fn build_parameter_data(settings: &GhPythonSettings, guids: &mut impl GuidSource) -> ChunkNode {
    let inputs = &settings.input_parameters;
    let outputs = &settings.output_parameters;

    let mut params = ChunkNode::new("ParameterData");
    params.set_int32("InputCount", count(inputs));
    for i in 0..inputs.len() {
        params.set_guid_at("InputId", slot(i), INPUT_PARAM_ID);
    }
    params.set_int32("OutputCount", count(outputs));
    for i in 0..outputs.len() {
        params.set_guid_at("OutputId", slot(i), OUTPUT_PARAM_ID);
    }

    for (i, param) in inputs.iter().enumerate() {
        let chunk = params.create_chunk_at("InputParam", slot(i));
        write_common(chunk, param);
        chunk.set_boolean("AllowTreeAccess", param.allow_tree_access);
        chunk.set_boolean("ShowTypeHints", param.show_type_hints);
        chunk.set_int32("ScriptParamAccess", param.script_param_access);
        chunk.set_int32("SourceCount", 0);
        chunk.set_guid("InstanceGuid", guids.next_guid());
        chunk.set_guid("TypeHintID", param.type_hint_id);
        chunk.set_int32("WireDisplay", param.wire_display);
    }

    for (i, param) in outputs.iter().enumerate() {
        let chunk = params.create_chunk_at("OutputParam", slot(i));
        write_common(chunk, param);
        chunk.set_int32("SourceCount", 0);
        chunk.set_guid("InstanceGuid", guids.next_guid());
    }

    params
}

fn write_common(chunk: &mut ChunkNode, param: &ParamSpec) {
    chunk.set_string("Name", &param.name);
    chunk.set_string("NickName", &param.nickname);
    chunk.set_string("Description", &param.description);
    chunk.set_boolean("Optional", param.optional);
}

// Parameter lists come from a JSON document; i32/u32 overflow is not reachable.
fn count(params: &[ParamSpec]) -> i32 {
    i32::try_from(params.len()).unwrap_or(i32::MAX)
}

fn slot(i: usize) -> u32 {
    u32::try_from(i).unwrap_or(u32::MAX)
}
