mod automation;
mod boards;
mod common;

pub use automation::{
    CreateRuleFromFieldsRequest, CreateRuleRequest, RuleCategoryQuery, TemplateCatalogResponse,
    UpdateRuleEnabledRequest,
};
pub use boards::{
    CreateCardRequest, CreateListRequest, MoveCardRequest, MoveListRequest,
    UpdateCardCompletionRequest,
};
pub use common::{EventAcceptedResponse, HealthResponse};
