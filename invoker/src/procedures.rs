//! Procedures exposed by the research-sol blog program
//!
//! Inputs are checked here the same way the program checks them, so an
//! invalid call fails locally instead of costing a round trip.

use serde_json::{json, Value};

use crate::error::InvokeError;
use crate::request::RemoteCallRequest;

#[derive(Debug, Clone, PartialEq)]
pub enum Procedure {
    /// Scaffold entry point
    Initialize,
    /// Create the blog account and its genesis post
    InitBlog,
    SignupUser {
        name: String,
        avatar: String,
    },
    /// Append a post; it becomes the blog's current post
    CreatePost {
        title: String,
        content: String,
        timestamp: u64,
    },
}

impl Procedure {
    pub fn name(&self) -> &'static str {
        match self {
            Procedure::Initialize => "initialize",
            Procedure::InitBlog => "init_blog",
            Procedure::SignupUser { .. } => "signup_user",
            Procedure::CreatePost { .. } => "create_post",
        }
    }

    fn args(&self) -> Vec<Value> {
        match self {
            Procedure::Initialize | Procedure::InitBlog => vec![],
            Procedure::SignupUser { name, avatar } => vec![json!(name), json!(avatar)],
            Procedure::CreatePost {
                title,
                content,
                timestamp,
            } => vec![json!(title), json!(content), json!(timestamp)],
        }
    }

    fn validate(&self) -> Result<(), InvokeError> {
        match self {
            Procedure::SignupUser { name, avatar } if name.is_empty() || avatar.is_empty() => Err(
                InvokeError::InvalidRequest("name and avatar must not be empty".to_string()),
            ),
            Procedure::CreatePost { title, content, .. }
                if title.is_empty() || content.is_empty() =>
            {
                Err(InvokeError::InvalidRequest(
                    "title and content must not be empty".to_string(),
                ))
            }
            _ => Ok(()),
        }
    }

    pub fn into_request(self) -> Result<RemoteCallRequest, InvokeError> {
        self.validate()?;
        RemoteCallRequest::new(self.name(), self.args())
    }
}

/// Custom error codes returned by the program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramError {
    BlogAlreadyInitialized = 0,
    InvalidInput = 1,
}

impl ProgramError {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(ProgramError::BlogAlreadyInitialized),
            1 => Some(ProgramError::InvalidInput),
            _ => None,
        }
    }

    /// Decode the program error behind a rejected call
    pub fn from_rejection(err: &InvokeError) -> Option<Self> {
        err.custom_code().and_then(Self::from_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_has_no_args() {
        let request = Procedure::Initialize.into_request().unwrap();
        assert_eq!(request.procedure(), "initialize");
        assert!(request.args().is_empty());
    }

    #[test]
    fn test_create_post_args_in_order() {
        let request = Procedure::CreatePost {
            title: "hello".to_string(),
            content: "first post".to_string(),
            timestamp: 1_700_000_000,
        }
        .into_request()
        .unwrap();

        assert_eq!(request.procedure(), "create_post");
        assert_eq!(
            request.args(),
            &[json!("hello"), json!("first post"), json!(1_700_000_000u64)]
        );
    }

    #[test]
    fn test_empty_inputs_rejected_locally() {
        let signup = Procedure::SignupUser {
            name: String::new(),
            avatar: "a.png".to_string(),
        };
        assert!(matches!(
            signup.into_request(),
            Err(InvokeError::InvalidRequest(_))
        ));

        let post = Procedure::CreatePost {
            title: "t".to_string(),
            content: String::new(),
            timestamp: 0,
        };
        assert!(post.into_request().is_err());
    }

    #[test]
    fn test_program_error_from_rejection() {
        let err = InvokeError::Rejected {
            code: -32002,
            message: "Transaction simulation failed".to_string(),
            data: Some(json!({ "err": { "InstructionError": [0, { "Custom": 0 }] } })),
        };
        assert_eq!(
            ProgramError::from_rejection(&err),
            Some(ProgramError::BlogAlreadyInitialized)
        );

        assert_eq!(ProgramError::from_code(42), None);
        assert_eq!(
            ProgramError::from_rejection(&InvokeError::Timeout(std::time::Duration::from_secs(1))),
            None
        );
    }
}
