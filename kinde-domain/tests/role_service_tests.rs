use kinde_domain::{
    application::services::{OrganizationManagementService, RoleManagementService},
    domain::{
        entities::{Organization, OrganizationUsersRequest, Role, User},
        errors::DomainError,
    },
};
use std::sync::Arc;

mod mocks;
use mocks::MockKindeRepository;

fn admin() -> Role {
    Role::new("r_admin", "admin")
}

fn member() -> User {
    User::new("a@x.com").with_id("u1")
}

#[tokio::test]
async fn test_adding_held_role_is_a_no_op() {
    // Arrange
    let repository =
        Arc::new(MockKindeRepository::new().with_user_roles("u1", "org_a", vec![admin()]));
    let roles = RoleManagementService::new(repository.clone());

    // Act
    let response = roles.manage_user_role(&member(), "org_a", &admin(), false).await.unwrap();

    // Assert
    assert!(response.is_successful());
    assert_eq!(repository.call_count("add_user_role"), 0);
    assert_eq!(repository.call_count("list_user_roles"), 1);
}

#[tokio::test]
async fn test_removing_missing_role_is_a_no_op() {
    let repository = Arc::new(MockKindeRepository::new());
    let roles = RoleManagementService::new(repository.clone());

    let response = roles.manage_user_role(&member(), "org_a", &admin(), true).await.unwrap();

    assert!(response.is_successful());
    assert_eq!(repository.call_count("remove_user_role"), 0);
}

#[tokio::test]
async fn test_role_is_added_then_removed() {
    let repository = Arc::new(MockKindeRepository::new());
    let roles = RoleManagementService::new(repository.clone());

    let added = roles.manage_user_role(&member(), "org_a", &admin(), false).await.unwrap();
    assert!(added.is_successful());
    assert!(repository.calls().contains(&"add_user_role:org_a/u1/r_admin".to_string()));
    assert!(roles.user_has_role("u1", "org_a", "r_admin").await.unwrap());

    let removed = roles.manage_user_role(&member(), "org_a", &admin(), true).await.unwrap();
    assert!(removed.is_successful());
    assert_eq!(repository.call_count("remove_user_role"), 1);
    assert!(!roles.user_has_role("u1", "org_a", "r_admin").await.unwrap());
}

#[tokio::test]
async fn test_missing_identifiers_yield_error_response_without_calls() {
    let repository = Arc::new(MockKindeRepository::new());
    let roles = RoleManagementService::new(repository.clone());

    let no_user = roles
        .manage_user_role(&User::new("a@x.com"), "org_a", &admin(), false)
        .await
        .unwrap();
    let no_role = roles
        .manage_user_role(&member(), "org_a", &Role::default(), false)
        .await
        .unwrap();
    let no_org = roles.manage_user_role(&member(), "", &admin(), false).await.unwrap();

    for response in [no_user, no_role, no_org] {
        assert_eq!(response.code.as_deref(), Some("Error"));
        assert!(!response.is_successful());
    }
    assert!(repository.calls().is_empty());
}

#[tokio::test]
async fn test_lookup_failure_is_an_error_not_a_no_op() {
    let repository = Arc::new(MockKindeRepository::new());
    repository.set_should_fail(true);
    let roles = RoleManagementService::new(repository.clone());

    let result = roles.manage_user_role(&member(), "org_a", &admin(), false).await;

    assert!(matches!(result, Err(DomainError::ExternalService { .. })));
}

#[tokio::test]
async fn test_update_organization_requires_code() {
    let repository = Arc::new(
        MockKindeRepository::new().with_organization(Organization::new("Acme").with_code("org_a")),
    );
    let organizations = OrganizationManagementService::new(repository.clone());

    let missing = organizations.update_organization(&Organization::new("Acme")).await;
    assert!(matches!(missing, Err(DomainError::Validation { .. })));
    assert!(repository.calls().is_empty());

    let mut renamed = Organization::new("Acme Corp").with_code("org_a");
    renamed.is_auto_membership_enabled = true;
    let response = organizations.update_organization(&renamed).await.unwrap();
    assert!(response.is_successful());

    let stored = organizations.get_organization("org_a").await.unwrap();
    assert_eq!(stored.name.as_deref(), Some("Acme Corp"));
}

#[tokio::test]
async fn test_organization_lifecycle() {
    let repository = Arc::new(MockKindeRepository::new());
    let organizations = OrganizationManagementService::new(repository.clone());

    organizations
        .add_organization(&Organization::new("Acme").with_code("org_a"))
        .await
        .unwrap();
    assert_eq!(organizations.list_organizations().await.unwrap().len(), 1);

    let empty = organizations
        .add_organization_users("org_a", &OrganizationUsersRequest::default())
        .await;
    assert!(matches!(empty, Err(DomainError::Validation { .. })));

    organizations
        .add_organization_users("org_a", &OrganizationUsersRequest::single("u1"))
        .await
        .unwrap();
    organizations.remove_organization_user("org_a", "u1").await.unwrap();
    organizations.delete_organization("org_a").await.unwrap();

    assert!(organizations.list_organizations().await.unwrap().is_empty());
    assert!(organizations.get_organization("org_a").await.unwrap_err().is_not_found());
}
