//! Account creation: one provider call, one mapped outcome.

use super::{create_user_message, validate_form, AccountForm};
use crate::{
    firebase::Reason,
    front::{views, FrontState},
};
use axum::{
    response::{IntoResponse, Redirect, Response},
    Extension, Form,
};
use tracing::error;

pub async fn create_user_form() -> Response {
    views::create_user("", None).into_response()
}

pub async fn create_user(
    Extension(state): Extension<FrontState>,
    Form(form): Form<AccountForm>,
) -> Response {
    if let Some(message) = validate_form(&form) {
        return views::create_user(&form.email, Some(message)).into_response();
    }

    match state.auth.create_account(&form.email, &form.password).await {
        Ok(link) if !link.token.is_empty() => Redirect::to("/Home/SignIn").into_response(),
        Ok(_) => {
            error!("account created but the provider returned an empty token");
            views::create_user(&form.email, Some(create_user_message(Reason::Unknown)))
                .into_response()
        }
        Err(err) => {
            let reason = err.reason();
            error!("account creation failed: {err}");
            views::create_user(&form.email, Some(create_user_message(reason))).into_response()
        }
    }
}
