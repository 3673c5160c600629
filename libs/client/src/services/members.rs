//! Members service

use rxboard_models::{Claim, Member, MemberDraft, MemberQuery, Page, PageRequest};

use super::{validate_id, Resource, ResourceService};
use crate::error::Result;

pub type MemberService = ResourceService<Member>;

impl Resource for Member {
    const NAME: &'static str = "members";
    const COLLECTION_KEY: &'static str = "members";

    type Query = MemberQuery;
    type Draft = MemberDraft;

    fn id(&self) -> i64 {
        self.id
    }
}

impl ResourceService<Member> {
    /// Claims filed for one member, newest fill first
    pub async fn claims(&self, member_id: i64, page: PageRequest) -> Result<Page<Claim>> {
        validate_id(Member::NAME, member_id)?;
        let path = format!("{}/claims", Self::record_path(member_id));
        let body = self
            .api()
            .get_value(&path, &page)
            .await
            .map_err(|e| e.for_record(Member::NAME, member_id))?;
        Ok(Page::from_envelope(body, Claim::COLLECTION_KEY, page)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::gateway::{ApiClient, ApiRequest, Transport};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Arc;

    struct MemberClaims;

    #[async_trait]
    impl Transport for MemberClaims {
        async fn send(&self, request: ApiRequest) -> Result<Value> {
            match request.path.as_str() {
                "/api/members/5/claims" => Ok(json!({
                    "member_id": 5,
                    "claims": [{"id": 9, "claim_number": "CLM-9", "member_id": 5, "status": "approved"}],
                    "total": 21,
                    "pages": 3,
                    "current_page": request.params["page"].parse::<u32>().unwrap()
                })),
                _ => Err(Error::HttpStatus {
                    code: 404,
                    message: None,
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_member_claims_page() {
        let service = MemberService::new(ApiClient::with_transport(Arc::new(MemberClaims)));

        let page = service.claims(5, PageRequest::new(3, 10)).await.unwrap();
        assert_eq!(page.items[0].claim_number, "CLM-9");
        assert_eq!(page.pages, 3);
        assert_eq!(page.current_page, 3);
    }

    #[tokio::test]
    async fn test_member_claims_unknown_member() {
        let service = MemberService::new(ApiClient::with_transport(Arc::new(MemberClaims)));

        let err = service.claims(6, PageRequest::default()).await.unwrap_err();
        assert_eq!(
            err,
            Error::NotFound {
                resource: "members".to_string(),
                id: 6
            }
        );
    }
}
