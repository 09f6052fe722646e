use folio_core_contact_form_impl::ContactFormServiceImpl;
use folio_core_contact_impl::ContactServiceImpl;
use folio_core_health_impl::HealthServiceImpl;
use folio_core_notification_impl::NotificationServiceImpl;
use folio_email_impl::EmailServiceImpl;
use folio_extern_impl::contact_relay::ContactRelayApiServiceImpl;
use folio_templates_impl::TemplateServiceImpl;

// API
pub type RestServer = folio_api_rest::RestServer<Health, Contact>;

// Extern
pub type ContactRelay = ContactRelayApiServiceImpl;

// Services
pub type Email = EmailServiceImpl;
pub type Template = TemplateServiceImpl;

// Core
pub type Contact = ContactServiceImpl<Email, Template>;
pub type Health = HealthServiceImpl<Email>;
pub type Notification = NotificationServiceImpl;
pub type ContactForm<View> = ContactFormServiceImpl<Notification, View, ContactRelay>;
