//! OBJ loading into scene objects.
//!
//! Only geometry is kept: all models in the file are merged into one
//! triangulated [`Mesh`] whose bounding sphere becomes the object's pick
//! volume. Materials are left to the render backend.

use std::io::BufRead;
use std::path::Path;

use crate::error::{Result, SceneError};
use crate::gfx::geometry::Mesh;

use super::object::SceneObject;

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    }
}

/// Load an OBJ file as a single scene object
pub fn load_obj(path: impl AsRef<Path>) -> Result<SceneObject> {
    let path = path.as_ref();
    let (models, _materials) = tobj::load_obj(path, &load_options())?;

    let fallback = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "model".to_string());
    object_from_models(&fallback, &models)
}

/// Load OBJ text from a reader; `mtllib` references are ignored
pub fn load_obj_from_reader(name: &str, reader: &mut impl BufRead) -> Result<SceneObject> {
    let (models, _materials) = tobj::load_obj_buf(reader, &load_options(), |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })?;
    object_from_models(name, &models)
}

fn object_from_models(fallback_name: &str, models: &[tobj::Model]) -> Result<SceneObject> {
    let mut mesh = Mesh::default();
    for model in models {
        mesh.append(&Mesh::from_flat(
            &model.mesh.positions,
            model.mesh.indices.clone(),
        ));
    }

    if mesh.is_empty() {
        return Err(SceneError::EmptyModel(fallback_name.to_string()));
    }

    let name = models
        .first()
        .map(|model| model.name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(fallback_name);

    log::debug!(
        "Loaded model '{}': {} vertices, {} triangles",
        name,
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(SceneObject::new(name).with_mesh(mesh))
}
