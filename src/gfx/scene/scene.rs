use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::SceneConfig;
use crate::error::{Result, SceneError};
use crate::gfx::camera::{Camera, CameraUniform, OrbitCamera, Projection};

use super::light::Light;
use super::object::{ObjectId, SceneObject};

#[derive(Debug, Clone)]
struct Entry {
    id: ObjectId,
    object: SceneObject,
}

/// The live set of scene objects, in insertion order.
///
/// Objects are identified by the [`ObjectId`] returned from [`ObjectSet::add`],
/// never by value. Ids are not reused, so a stale id simply finds nothing.
#[derive(Debug, Clone)]
pub struct ObjectSet {
    entries: Vec<Entry>,
    next_id: u64,
}

impl Default for ObjectSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectSet {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    pub fn add(&mut self, object: SceneObject) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        log::debug!("Adding object {} '{}'", id, object.name);
        self.entries.push(Entry { id, object });
        id
    }

    /// Removes and returns the object; a stale id is a no-op
    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        match self.index_of(id) {
            Some(index) => {
                let entry = self.entries.remove(index);
                log::debug!("Removed object {} '{}'", id, entry.object.name);
                Some(entry.object)
            }
            None => {
                log::debug!("Ignoring removal of unknown object {}", id);
                None
            }
        }
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn at(&self, index: usize) -> Option<&SceneObject> {
        self.entries.get(index).map(|entry| &entry.object)
    }

    pub fn at_mut(&mut self, index: usize) -> Option<&mut SceneObject> {
        self.entries.get_mut(index).map(|entry| &mut entry.object)
    }

    pub fn id_at(&self, index: usize) -> Option<ObjectId> {
        self.entries.get(index).map(|entry| entry.id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.index_of(id).map(|index| &self.entries[index].object)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        let index = self.index_of(id)?;
        Some(&mut self.entries[index].object)
    }

    /// Like [`ObjectSet::get_mut`], but reports a stale id as an error
    pub fn require_mut(&mut self, id: ObjectId) -> Result<&mut SceneObject> {
        self.get_mut(id).ok_or(SceneError::UnknownObject(id))
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.entries.iter().map(|entry| (entry.id, &entry.object))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ObjectId, &mut SceneObject)> {
        self.entries.iter_mut().map(|entry| (entry.id, &mut entry.object))
    }

    pub fn ids(&self) -> Vec<ObjectId> {
        self.entries.iter().map(|entry| entry.id).collect()
    }

    /// Visits every object once in order, dropping those for which `keep`
    /// returns false. Returns the removed ids.
    pub fn sweep<F>(&mut self, mut keep: F) -> Vec<ObjectId>
    where
        F: FnMut(ObjectId, &mut SceneObject) -> bool,
    {
        let mut removed = Vec::new();
        let mut write = 0;
        for read in 0..self.entries.len() {
            let entry = &mut self.entries[read];
            if keep(entry.id, &mut entry.object) {
                self.entries.swap(write, read);
                write += 1;
            } else {
                removed.push(entry.id);
            }
        }
        self.entries.truncate(write);

        if !removed.is_empty() {
            log::debug!("Swept {} objects from the scene", removed.len());
        }
        removed
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }
}

/// Everything one canvas needs: objects, camera, lights and projection.
///
/// Owned by the application and handed by reference to the scheduler, the
/// picker and user callbacks.
pub struct SceneContext {
    pub objects: ObjectSet,
    pub camera: Camera,
    pub projection: Projection,
    pub camera_uniform: CameraUniform,
    pub ambient: [f32; 3],
    pub rng: StdRng,
    lights: Vec<Light>,
    max_lights: usize,
    canvas: (u32, u32),
}

impl SceneContext {
    /// Builds an empty scene with an orbit camera from `config`
    pub fn new(config: &SceneConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let (width, height) = (config.canvas.width, config.canvas.height);

        Self {
            objects: ObjectSet::new(),
            camera: Camera::Orbit(OrbitCamera::from_config(&config.orbit)),
            projection: Projection::from_config(&config.projection, width, height),
            camera_uniform: CameraUniform::default(),
            ambient: [0.0, 0.0, 0.0],
            rng,
            lights: Vec::new(),
            max_lights: config.max_lights,
            canvas: (width, height),
        }
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        self.canvas
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas = (width, height);
        self.projection.resize(width, height);
    }

    pub fn set_camera(&mut self, camera: impl Into<Camera>) {
        self.camera = camera.into();
    }

    pub fn add_light(&mut self, light: Light) -> Result<usize> {
        if self.lights.len() >= self.max_lights {
            return Err(SceneError::TooManyLights {
                max: self.max_lights,
            });
        }
        log::debug!("Adding light '{}'", light.name);
        self.lights.push(light);
        Ok(self.lights.len() - 1)
    }

    pub fn remove_light(&mut self, index: usize) -> Option<Light> {
        (index < self.lights.len()).then(|| self.lights.remove(index))
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn light_mut(&mut self, index: usize) -> Option<&mut Light> {
        self.lights.get_mut(index)
    }

    pub fn lights_mut(&mut self) -> &mut [Light] {
        &mut self.lights
    }

    /// Recompute the camera uniform from the current camera and projection
    pub fn refresh_camera_uniform(&mut self) {
        self.camera_uniform.update(&self.camera, &self.projection);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector3;

    fn set_of(n: usize) -> (ObjectSet, Vec<ObjectId>) {
        let mut set = ObjectSet::new();
        let ids = (0..n)
            .map(|i| set.add(SceneObject::new(format!("object_{}", i))))
            .collect();
        (set, ids)
    }

    #[test]
    fn test_add_assigns_unique_ids() {
        let (set, ids) = set_of(3);
        assert_eq!(set.size(), 3);
        assert_ne!(ids[0], ids[1]);
        assert_eq!(set.id_at(2), Some(ids[2]));
        assert_eq!(set.at(1).map(|o| o.name.as_str()), Some("object_1"));
    }

    #[test]
    fn test_remove_is_by_identity() {
        let (mut set, ids) = set_of(3);
        let removed = set.remove(ids[1]).unwrap();
        assert_eq!(removed.name, "object_1");
        assert!(!set.contains(ids[1]));
        assert_eq!(set.ids(), vec![ids[0], ids[2]]);
    }

    #[test]
    fn test_stale_id_is_noop() {
        let (mut set, ids) = set_of(2);
        set.remove(ids[0]);
        assert!(set.remove(ids[0]).is_none());
        assert!(set.get_mut(ids[0]).is_none());
        assert!(matches!(set.require_mut(ids[0]), Err(SceneError::UnknownObject(_))));
        assert_eq!(set.size(), 1);
    }

    #[test]
    fn test_sweep_visits_each_once() {
        let (mut set, ids) = set_of(5);
        let mut visited = Vec::new();
        let removed = set.sweep(|id, _| {
            visited.push(id);
            id != ids[1] && id != ids[3]
        });
        assert_eq!(visited, ids);
        assert_eq!(removed, vec![ids[1], ids[3]]);
        assert_eq!(set.ids(), vec![ids[0], ids[2], ids[4]]);
    }

    #[test]
    fn test_sweep_on_empty_set() {
        let mut set = ObjectSet::new();
        assert!(set.sweep(|_, _| false).is_empty());
    }

    #[test]
    fn test_light_capacity() {
        let config = SceneConfig {
            max_lights: 1,
            rng_seed: Some(7),
            ..SceneConfig::default()
        };
        let mut scene = SceneContext::new(&config);
        assert_eq!(scene.add_light(Light::directional("sun", Vector3::unit_y())).unwrap(), 0);
        let err = scene
            .add_light(Light::directional("fill", Vector3::unit_x()))
            .unwrap_err();
        assert!(matches!(err, SceneError::TooManyLights { max: 1 }));
        assert!(scene.remove_light(0).is_some());
        assert!(scene.remove_light(0).is_none());
    }

    #[test]
    fn test_context_starts_with_orbit_camera() {
        let scene = SceneContext::new(&SceneConfig::default());
        assert!(scene.camera.as_orbit().is_some());
        assert!(scene.objects.is_empty());
        assert_eq!(scene.canvas_size(), (500, 500));
    }
}
