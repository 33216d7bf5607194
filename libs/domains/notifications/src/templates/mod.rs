//! Email template rendering engine.
//!
//! Handlebars-based rendering for the appointment confirmation email.
//! All user-supplied fields pass through `{{...}}` interpolation, so they
//! are HTML-escaped before landing in the document.

use crate::error::{NotificationError, NotificationResult};
use crate::models::AppointmentNotification;
use handlebars::Handlebars;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Subject line for appointment confirmations.
pub const CONFIRMATION_SUBJECT: &str = "Appointment Confirmation - DentCare";

/// Rendered email content.
#[derive(Debug, Clone)]
pub struct RenderedEmail {
    /// HTML body content.
    pub html: String,
    /// Plain text body content.
    pub text: String,
    /// Email subject line.
    pub subject: String,
}

/// Template engine for rendering email templates.
pub struct TemplateEngine {
    handlebars: Arc<Handlebars<'static>>,
}

#[derive(Serialize)]
struct ConfirmationData<'a> {
    doctor_name: &'a str,
    appointment_type: &'a str,
    appointment_date: &'a str,
    appointment_time: &'a str,
    duration: &'a str,
    price: &'a str,
    app_url: &'a str,
}

impl TemplateEngine {
    /// Create a new template engine with all templates registered.
    pub fn new() -> NotificationResult<Self> {
        let mut handlebars = Handlebars::new();

        handlebars
            .register_template_string("appointment_confirmation_html", CONFIRMATION_HTML_TEMPLATE)
            .map_err(|e| {
                NotificationError::Template(format!(
                    "Failed to register appointment_confirmation_html: {}",
                    e
                ))
            })?;
        handlebars
            .register_template_string("appointment_confirmation_text", CONFIRMATION_TEXT_TEMPLATE)
            .map_err(|e| {
                NotificationError::Template(format!(
                    "Failed to register appointment_confirmation_text: {}",
                    e
                ))
            })?;

        Ok(Self {
            handlebars: Arc::new(handlebars),
        })
    }

    fn render<T: Serialize>(&self, template_name: &str, data: &T) -> NotificationResult<String> {
        self.handlebars
            .render(template_name, data)
            .map_err(|e| NotificationError::Template(e.to_string()))
    }

    /// Render the appointment confirmation email.
    ///
    /// `app_url` is the public base URL supplying the logo and the
    /// appointment link; an empty string yields relative asset paths.
    pub fn render_appointment_confirmation(
        &self,
        notification: &AppointmentNotification,
        app_url: &str,
    ) -> NotificationResult<RenderedEmail> {
        debug!(doctor = %notification.doctor_name, "Rendering appointment confirmation email");

        let data = ConfirmationData {
            doctor_name: &notification.doctor_name,
            appointment_type: &notification.appointment_type,
            appointment_date: &notification.appointment_date,
            appointment_time: &notification.appointment_time,
            duration: &notification.duration,
            price: &notification.price,
            app_url,
        };

        let html = self.render("appointment_confirmation_html", &data)?;
        let text = self.render("appointment_confirmation_text", &data)?;

        Ok(RenderedEmail {
            html,
            text,
            subject: CONFIRMATION_SUBJECT.to_string(),
        })
    }
}

const CONFIRMATION_HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>DentCare Appointment Confirmation</title>
</head>
<body style="background-color: #ffffff; font-family: Arial, Helvetica, sans-serif; margin: 0;">
  <div style="display: none; max-height: 0; overflow: hidden;">Your DentCare appointment is confirmed</div>
  <div style="margin: 0 auto; padding: 24px 0 48px; max-width: 560px;">
    <div style="text-align: center; margin-bottom: 12px;">
      <img src="{{app_url}}/logo.png" width="48" height="48" alt="DentCare" style="border-radius: 8px;">
    </div>
    <h1 style="color: #111827; font-size: 22px; font-weight: 700; text-align: center; margin: 4px 0 16px;">DentCare Appointment Confirmation</h1>
    <p style="color: #374151; font-size: 15px; line-height: 24px; margin: 10px 0;">
      Your appointment has been successfully scheduled. Here are the details:
    </p>
    <div style="background-color: #f3f4f6; border-radius: 8px; padding: 16px; margin-top: 12px;">
      <p style="margin: 6px 0;"><b>Doctor:</b> {{doctor_name}}</p>
      <p style="margin: 6px 0;"><b>Appointment Type:</b> {{appointment_type}}</p>
      <p style="margin: 6px 0;"><b>Date:</b> {{appointment_date}}</p>
      <p style="margin: 6px 0;"><b>Time:</b> {{appointment_time}}</p>
      <p style="margin: 6px 0;"><b>Duration:</b> {{duration}}</p>
      <p style="margin: 6px 0;"><b>Consultation Fee:</b> {{price}}</p>
    </div>
    <p style="color: #374151; font-size: 15px; line-height: 24px; margin: 10px 0;">
      Please arrive 10-15 minutes before your appointment time.
      If you need to reschedule, you may reply directly to this email.
    </p>
    <div style="text-align: center; margin-top: 20px;">
      <a href="{{app_url}}/appointments" style="background-color: #2563eb; color: #ffffff; padding: 12px 22px; border-radius: 6px; text-decoration: none; font-size: 15px; font-weight: 600; display: inline-block;">View My Appointment</a>
    </div>
    <p style="color: #6b7280; font-size: 13px; margin-top: 28px; text-align: center;">
      DentCare Support<br>
      For appointment-related queries, you may reply directly to this email.
    </p>
  </div>
</body>
</html>"#;

const CONFIRMATION_TEXT_TEMPLATE: &str = r#"DentCare Appointment Confirmation

Your appointment has been successfully scheduled. Here are the details:

Doctor: {{doctor_name}}
Appointment Type: {{appointment_type}}
Date: {{appointment_date}}
Time: {{appointment_time}}
Duration: {{duration}}
Consultation Fee: {{price}}

Please arrive 10-15 minutes before your appointment time.
If you need to reschedule, you may reply directly to this email.

View your appointment: {{app_url}}/appointments

DentCare Support
"#;
