use crate::client::Email;
use crate::domain::EmailAddress;
use crate::model::NotificationPayload;

/// Fixed addressing for meeting notifications, loaded from settings
#[derive(Debug, Clone)]
pub struct NotificationContacts {
    /// Where new meeting requests are reported
    pub operator_email: EmailAddress,
    /// Sender display name on operator notifications
    pub operator_sender_name: String,
    /// Site owner, signs the requester confirmation
    pub owner_name: String,
}

/// Message to the site operator describing a new meeting request
pub fn operator_notification(contacts: &NotificationContacts, payload: &NotificationPayload) -> Email {
    let mut fields = vec![("Name", payload.name.as_str()), ("Email", payload.email.as_str())];
    if let Some(phone) = &payload.phone {
        fields.push(("Phone", phone.as_str()));
    }
    if let Some(subject) = &payload.subject {
        fields.push(("Subject", subject.as_str()));
    }
    fields.push(("Meeting Date", payload.meeting_date.as_str()));
    fields.push(("Meeting Time", payload.meeting_time.as_str()));
    if let Some(message) = &payload.message {
        fields.push(("Message", message.as_str()));
    }

    let mut html_body = String::from("<h1>New Meeting Request</h1>");
    let mut text_body = String::from("New Meeting Request\n\n");
    for (label, value) in &fields {
        html_body.push_str(&format!("<p><strong>{}:</strong> {}</p>", label, escape_html(value)));
        text_body.push_str(&format!("{}: {}\n", label, value));
    }
    html_body.push_str(
        "<hr><p><em>This meeting request was submitted through your portfolio website.</em></p>",
    );
    text_body.push_str("\nThis meeting request was submitted through your portfolio website.\n");

    Email {
        recipient: contacts.operator_email.clone(),
        sender_name: Some(contacts.operator_sender_name.clone()),
        subject: format!("New Meeting Request from {}", payload.name),
        html_body,
        text_body,
    }
}

/// Confirmation sent back to the person who booked
pub fn requester_confirmation(
    contacts: &NotificationContacts,
    recipient: EmailAddress,
    payload: &NotificationPayload,
) -> Email {
    let owner = &contacts.owner_name;

    let mut html_body = format!(
        "<h1>Thank you for scheduling a meeting, {}!</h1>\
         <p>I have received your meeting request for:</p>\
         <p><strong>Date:</strong> {}</p>\
         <p><strong>Time:</strong> {}</p>",
        escape_html(&payload.name),
        escape_html(&payload.meeting_date),
        escape_html(&payload.meeting_time),
    );
    let mut text_body = format!(
        "Thank you for scheduling a meeting, {}!\n\n\
         I have received your meeting request for:\n\
         Date: {}\n\
         Time: {}\n",
        payload.name, payload.meeting_date, payload.meeting_time,
    );
    if let Some(subject) = &payload.subject {
        html_body.push_str(&format!("<p><strong>Subject:</strong> {}</p>", escape_html(subject)));
        text_body.push_str(&format!("Subject: {}\n", subject));
    }
    html_body.push_str(&format!(
        "<p>I will get back to you shortly to confirm the meeting.</p>\
         <p>Best regards,<br>{}</p>\
         <hr><p style=\"color: #666; font-size: 12px;\">\
         If you need to make changes or cancel, please reply to this email.</p>",
        escape_html(owner),
    ));
    text_body.push_str(&format!(
        "\nI will get back to you shortly to confirm the meeting.\n\n\
         Best regards,\n{}\n\n\
         If you need to make changes or cancel, please reply to this email.\n",
        owner,
    ));

    Email {
        recipient,
        sender_name: Some(owner.clone()),
        subject: format!("Meeting Request Received - {}", owner),
        html_body,
        text_body,
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
