//! Skill development service.

use super::{find_mut, position_of, ServiceResult};
use crate::model::skill::{Skill, SkillDraft};
use crate::repo::{
    load_collection, load_collection_for_update, save_collection, KeyValueStore,
};

pub struct SkillService<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SkillService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn list_skills(&self) -> ServiceResult<Vec<Skill>> {
        Ok(load_collection(&self.store)?)
    }

    pub fn add_skill(&self, draft: SkillDraft) -> ServiceResult<Skill> {
        let skill = Skill::from_draft(draft);
        skill.validate()?;
        let mut skills: Vec<Skill> = load_collection_for_update(&self.store)?;
        skills.push(skill.clone());
        save_collection(&self.store, &skills)?;
        Ok(skill)
    }

    pub fn edit_skill(&self, id: &str, draft: SkillDraft) -> ServiceResult<Skill> {
        self.modify(id, |skill| skill.apply_draft(draft))
    }

    /// Sets progress percentage, clamped into `0..=100`.
    pub fn update_progress(&self, id: &str, progress: f64) -> ServiceResult<Skill> {
        self.modify(id, |skill| skill.set_progress(progress))
    }

    pub fn delete_skill(&self, id: &str) -> ServiceResult<()> {
        let mut skills: Vec<Skill> = load_collection_for_update(&self.store)?;
        let index = position_of(&skills, id)?;
        skills.remove(index);
        save_collection(&self.store, &skills)?;
        Ok(())
    }

    fn modify(&self, id: &str, change: impl FnOnce(&mut Skill)) -> ServiceResult<Skill> {
        let mut skills: Vec<Skill> = load_collection_for_update(&self.store)?;
        let skill = find_mut(&mut skills, id)?;
        change(skill);
        skill.validate()?;
        let updated = skill.clone();
        save_collection(&self.store, &skills)?;
        Ok(updated)
    }
}
