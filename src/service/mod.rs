//! Class service: business rules over the class store.
//!
//! Uniqueness is checked here before insert; member edits load the whole class, change the
//! embedded list and save it back.

use crate::db::ClassRepository;
use crate::errors::AppError;
use crate::models::{
    Class, CreateClassRequest, Member, MemberRequest, NewClass, UpdateClassRequest,
};

/// Classes guaranteed to exist after [`ClassService::initialize_default_classes`], as (name, code).
pub const DEFAULT_CLASSES: [(&str, &str); 4] = [
    ("BSIT 2A", "BSIT-2A"),
    ("BSIT 2B", "BSIT-2B"),
    ("BSIT 2C", "BSIT-2C"),
    ("BSIT 2D", "BSIT-2D"),
];

#[derive(Clone)]
pub struct ClassService {
    repo: ClassRepository,
}

impl ClassService {
    pub fn new(repo: ClassRepository) -> Self {
        Self { repo }
    }

    /// Create a class with an empty roster.
    pub async fn create(&self, request: CreateClassRequest) -> Result<Class, AppError> {
        if self
            .repo
            .find_by_name_or_code(&request.name, &request.code)
            .await?
            .is_some()
        {
            return Err(AppError::Duplicate(
                "Class with this name or code already exists".to_string(),
            ));
        }

        let class = self
            .repo
            .insert(NewClass {
                name: request.name,
                code: request.code,
                git_repository: request.git_repository,
                system_url: request.system_url,
                members: Vec::new(),
            })
            .await?;

        tracing::info!(class_id = %class.id, code = %class.code, "Created class");
        Ok(class)
    }

    /// Create every default class whose code is not yet taken, returning the ones created.
    ///
    /// Existing classes are never modified. A collision raised while creating a seed is
    /// skipped, so concurrent callers settle on one class per code.
    pub async fn initialize_default_classes(&self) -> Result<Vec<Class>, AppError> {
        let mut created = Vec::new();

        for (name, code) in DEFAULT_CLASSES {
            if self.repo.find_by_code(code).await?.is_some() {
                continue;
            }

            let request = CreateClassRequest {
                name: name.to_string(),
                code: code.to_string(),
                git_repository: None,
                system_url: None,
            };

            match self.create(request).await {
                Ok(class) => created.push(class),
                Err(AppError::Duplicate(msg)) => {
                    tracing::warn!(code, "Skipping default class: {}", msg);
                }
                Err(e) => return Err(e),
            }
        }

        tracing::info!("Default classes initialized ({} created)", created.len());
        Ok(created)
    }

    /// All classes ordered by name.
    pub async fn find_all(&self) -> Result<Vec<Class>, AppError> {
        self.repo.list_all().await
    }

    pub async fn find_one(&self, id: &str) -> Result<Class, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Class not found".to_string()))
    }

    pub async fn find_by_code(&self, code: &str) -> Result<Class, AppError> {
        self.repo
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::NotFound("Class not found".to_string()))
    }

    /// Overwrite the supplied fields of a class. A link supplied as `null` is cleared.
    ///
    /// A supplied member list replaces the roster outright: every entry becomes a new
    /// member with a fresh id, so ids from an earlier read are not preserved.
    pub async fn update(&self, id: &str, request: UpdateClassRequest) -> Result<Class, AppError> {
        let mut class = self.find_one(id).await?;

        if let Some(git_repository) = request.git_repository {
            class.git_repository = git_repository;
        }
        if let Some(system_url) = request.system_url {
            class.system_url = system_url;
        }
        if let Some(members) = request.members {
            class.members = Some(
                members
                    .iter()
                    .map(|m| Member::new(id, &m.name, m.role.as_deref()))
                    .collect(),
            );
        }

        let class = self.repo.save(&class).await?;
        tracing::info!(class_id = %class.id, "Updated class");
        Ok(class)
    }

    /// Append a member to a class roster.
    pub async fn add_member(
        &self,
        class_id: &str,
        request: MemberRequest,
    ) -> Result<Member, AppError> {
        let mut class = self.find_one(class_id).await?;

        let member = Member::new(class_id, &request.name, request.role.as_deref());
        class
            .members
            .get_or_insert_with(Vec::new)
            .push(member.clone());

        self.repo.save(&class).await?;
        tracing::info!(class_id, member_id = %member.id, "Added member");
        Ok(member)
    }

    /// Remove a member from a class roster. An unknown member id leaves the roster unchanged.
    pub async fn remove_member(&self, class_id: &str, member_id: &str) -> Result<(), AppError> {
        let mut class = self.find_one(class_id).await?;

        let members = class
            .members
            .as_mut()
            .ok_or_else(|| AppError::NotFound("No members found".to_string()))?;
        members.retain(|m| m.id != member_id);

        self.repo.save(&class).await?;
        tracing::info!(class_id, member_id, "Removed member");
        Ok(())
    }

    pub async fn update_member_role(
        &self,
        class_id: &str,
        member_id: &str,
        role: &str,
    ) -> Result<Member, AppError> {
        let mut class = self.find_one(class_id).await?;

        let member = class
            .members
            .as_mut()
            .ok_or_else(|| AppError::NotFound("No members found".to_string()))?
            .iter_mut()
            .find(|m| m.id == member_id)
            .ok_or_else(|| AppError::NotFound("Member not found".to_string()))?;
        member.role = role.to_string();
        let member = member.clone();

        self.repo.save(&class).await?;
        tracing::info!(class_id, member_id, role, "Changed member role");
        Ok(member)
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        if !self.repo.delete_by_id(id).await? {
            return Err(AppError::NotFound("Class not found".to_string()));
        }

        tracing::info!(class_id = id, "Deleted class");
        Ok(())
    }
}
