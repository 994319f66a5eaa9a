//! Screens that are nothing more than a configured [`CrudManager`].

use api::resource::{self, Resource};
use api::ResourceApi;
use dioxus::prelude::*;

use crate::context::use_api;
use crate::crud::{Column, CrudHandle, CrudManager, FieldKind, FormField};

const IMAGE: &str = "image/*";

/// Stable handle for `resource` over the shared client.
fn use_resource_api(resource: Resource) -> CrudHandle {
    let client = use_api();
    use_hook(move || CrudHandle::new(ResourceApi::new(client, resource)))
}

fn timestamps() -> [Column; 2] {
    [
        Column::new("createdAt", "Created At").date(),
        Column::new("updatedAt", "Updated At").date(),
    ]
}

fn image_field(name: &'static str, label: &'static str) -> FormField {
    FormField::new(name, label, FieldKind::File).required().accept(IMAGE)
}

#[component]
pub fn UsersPage() -> Element {
    let api = use_resource_api(resource::USERS);
    let columns = vec![
        Column::new("id", "ID"),
        Column::new("username", "Username"),
        Column::new("email", "Email"),
        Column::new("role", "Role").badge(),
    ];
    let fields = vec![
        FormField::text("username", "Username").required().placeholder("Enter username"),
        FormField::new("email", "Email", FieldKind::Email)
            .required()
            .placeholder("user@example.com"),
        FormField::new("password", "Password", FieldKind::Password)
            .required()
            .placeholder("Minimum 6 characters"),
        FormField::new("role", "Role", FieldKind::Select)
            .required()
            .options([("admin", "Admin"), ("agent", "Agent")]),
    ];

    rsx! {
        CrudManager {
            title: "Users",
            api,
            columns,
            form_fields: fields,
            empty_message: "No users found. Add your first user to get started.",
        }
    }
}

#[component]
pub fn AgentsPage() -> Element {
    let api = use_resource_api(resource::AGENTS);
    let columns = vec![
        Column::new("photo", "Photo").image(),
        Column::new("full_name", "Name"),
        Column::new("email", "Email"),
        Column::new("title", "Title"),
        Column::new("phone", "Phone"),
        Column::new("status", "Status").badge(),
        Column::new("profile_visible", "Visible").boolean(),
    ];
    let fields = vec![
        FormField::text("username", "Username").required(),
        FormField::new("email", "Email", FieldKind::Email).required(),
        FormField::new("password", "Password", FieldKind::Password)
            .required()
            .placeholder("Minimum 6 characters"),
        FormField::text("first_name", "First Name"),
        FormField::text("last_name", "Last Name"),
        FormField::text("title", "Professional Title").placeholder("Senior Property Consultant"),
        FormField::text("phone", "Phone Number").placeholder("+971 50 000 0000"),
        FormField::new("bio", "Bio / About", FieldKind::Textarea),
        FormField::new("status", "Account Status", FieldKind::Select)
            .options([("active", "Active"), ("inactive", "Inactive")]),
        FormField::new("profile_visible", "Show on Public Website", FieldKind::Checkbox),
        FormField::new("photo", "Profile Photo", FieldKind::File).accept(IMAGE),
    ];

    rsx! {
        CrudManager {
            title: "Agents",
            api,
            columns,
            form_fields: fields,
            empty_message: "No agents found. Add your first agent to get started.",
        }
    }
}

#[component]
pub fn PropertiesPage() -> Element {
    let api = use_resource_api(resource::PROPERTIES);
    let mut columns = vec![
        Column::new("id", "ID"),
        Column::new("img", "Image").image(),
        Column::new("title", "Title"),
        Column::new("location", "Location"),
        Column::new("price", "Price"),
    ];
    columns.extend(timestamps());
    let fields = vec![
        image_field("img", "Image"),
        FormField::text("title", "Title").required(),
        FormField::text("location", "Location").required(),
        FormField::text("price", "Price").required(),
    ];

    rsx! {
        CrudManager {
            title: "Properties",
            api,
            columns,
            form_fields: fields,
            empty_message: "No properties found",
        }
    }
}

#[component]
pub fn CollaborationsPage() -> Element {
    let api = use_resource_api(resource::COLLABORATIONS);
    let mut columns = vec![
        Column::new("id", "ID"),
        Column::new("img", "Image").image(),
        Column::new("logo", "Logo").image(),
        Column::new("title", "Title"),
        Column::new("desc", "Description").truncate(100),
    ];
    columns.extend(timestamps());
    let fields = vec![
        image_field("img", "Image"),
        image_field("logo", "Logo"),
        FormField::text("title", "Title").required(),
        FormField::new("desc", "Description", FieldKind::Textarea).required(),
    ];

    rsx! {
        CrudManager {
            title: "Collaborations",
            api,
            columns,
            form_fields: fields,
            empty_message: "No collaborations found",
        }
    }
}

#[component]
pub fn SlidesPage() -> Element {
    let api = use_resource_api(resource::SLIDES);
    let mut columns = vec![
        Column::new("id", "ID"),
        Column::new("img", "Image").image(),
        Column::new("title", "Title"),
        Column::new("location", "Location"),
        Column::new("points", "Points").truncate(60),
    ];
    columns.extend(timestamps());
    let fields = vec![
        image_field("img", "Image"),
        FormField::text("title", "Title").required(),
        FormField::text("location", "Location").required(),
        FormField::new("points", "Points", FieldKind::Tags)
            .required()
            .placeholder("Sea view, Private pool, Smart home"),
    ];

    rsx! {
        CrudManager {
            title: "Slides",
            api,
            columns,
            form_fields: fields,
            empty_message: "No slides found",
        }
    }
}

#[component]
pub fn YourPerfectPage() -> Element {
    let api = use_resource_api(resource::YOUR_PERFECT);
    let mut columns = vec![
        Column::new("id", "ID"),
        Column::new("img", "Image").image(),
        Column::new("title", "Title"),
        Column::new("price", "Price"),
    ];
    columns.extend(timestamps());
    let fields = vec![
        image_field("img", "Image"),
        FormField::text("title", "Title").required(),
        FormField::text("price", "Price").required(),
    ];

    rsx! {
        CrudManager {
            title: "YourPerfect",
            api,
            columns,
            form_fields: fields,
            empty_message: "No YourPerfect items found",
        }
    }
}

#[component]
pub fn SidebarCardsPage() -> Element {
    let api = use_resource_api(resource::SIDEBAR_CARD);
    let mut columns = vec![
        Column::new("id", "ID"),
        Column::new("img", "Image").image(),
        Column::new("title", "Title"),
        Column::new("desc", "Description").truncate(80),
    ];
    columns.extend(timestamps());
    let fields = vec![
        image_field("img", "Image"),
        FormField::text("title", "Title").required(),
        FormField::new("desc", "Description", FieldKind::Textarea).required(),
    ];

    rsx! {
        CrudManager {
            title: "Sidebar Cards",
            api,
            columns,
            form_fields: fields,
            empty_message: "No sidebar cards found",
        }
    }
}

#[component]
pub fn DamacPage() -> Element {
    let api = use_resource_api(resource::DAMAC);
    let mut columns = vec![
        Column::new("id", "ID"),
        Column::new("video", "Video Link").truncate(60),
    ];
    columns.extend(timestamps());
    let fields = vec![FormField::new("video", "Video Link", FieldKind::Url)
        .required()
        .placeholder("https://www.youtube.com/watch?v=...")];

    rsx! {
        CrudManager {
            title: "DAMAC",
            api,
            columns,
            form_fields: fields,
            empty_message: "No DAMAC videos found",
        }
    }
}

#[component]
pub fn EmpoweringCommunitiesPage() -> Element {
    let api = use_resource_api(resource::EMPOWERING_COMMUNITIES);
    let mut columns = vec![
        Column::new("id", "ID"),
        Column::new("img", "Image").image(),
        Column::new("title", "Title"),
        Column::new("desc", "Description").truncate(80),
    ];
    columns.extend(timestamps());
    let fields = vec![
        image_field("img", "Image"),
        FormField::text("title", "Title").required(),
        FormField::new("desc", "Description", FieldKind::Textarea),
    ];

    rsx! {
        CrudManager {
            title: "Empowering Communities",
            api,
            columns,
            form_fields: fields,
            empty_message: "No community items found",
        }
    }
}

#[component]
pub fn HeroPage() -> Element {
    let api = use_resource_api(resource::HERO);
    let columns = vec![
        Column::new("media", "Media").image(),
        Column::new("type", "Type").badge(),
        Column::new("heading", "Heading"),
        Column::new("subheading", "Subheading").truncate(60),
        Column::new("cta_text", "Button"),
        Column::new("is_active", "Active").boolean(),
    ];
    let fields = vec![
        FormField::new("type", "Media Type", FieldKind::Select)
            .required()
            .options([("image", "Image"), ("video", "Video")]),
        FormField::text("heading", "Heading").required(),
        FormField::new("subheading", "Subheading", FieldKind::Textarea),
        FormField::new("media", "Background Image", FieldKind::File).accept(IMAGE),
        FormField::new("video", "Video URL", FieldKind::Url).placeholder("https://..."),
        FormField::text("cta_text", "Button Text").placeholder("Explore Properties"),
        FormField::text("cta_link", "Button Link").placeholder("/properties"),
        FormField::new("is_active", "Active", FieldKind::Checkbox),
    ];

    rsx! {
        CrudManager {
            title: "Hero Sections",
            api,
            columns,
            form_fields: fields,
            empty_message: "No hero sections yet. Create one to headline the website.",
        }
    }
}

#[component]
pub fn AgentPropertiesPage() -> Element {
    let api = use_resource_api(resource::AGENT_PROPERTIES);
    let columns = vec![
        Column::new("img", "Image").image(),
        Column::new("title", "Title"),
        Column::new("location", "Location"),
        Column::new("price", "Price"),
        Column::new("status", "Status").badge(),
    ];
    let fields = vec![
        FormField::new("img", "Image", FieldKind::File).accept(IMAGE),
        FormField::text("title", "Title").required(),
        FormField::text("location", "Location").required(),
        FormField::text("price", "Price").required(),
        FormField::new("status", "Status", FieldKind::Select)
            .options([("available", "Available"), ("reserved", "Reserved"), ("sold", "Sold")]),
        FormField::new("description", "Description", FieldKind::Textarea),
    ];

    rsx! {
        CrudManager {
            title: "My Properties",
            api,
            columns,
            form_fields: fields,
            empty_message: "You have no properties listed yet.",
        }
    }
}

#[component]
pub fn AgentAppointmentsPage() -> Element {
    let api = use_resource_api(resource::AGENT_APPOINTMENTS);
    let columns = vec![
        Column::new("client", "Client"),
        Column::new("property", "Property"),
        Column::new("date", "Date").date(),
        Column::new("time", "Time"),
        Column::new("status", "Status").badge(),
    ];
    let fields = vec![
        FormField::text("client", "Client").required(),
        FormField::text("property", "Property").required(),
        FormField::new("date", "Date", FieldKind::Date).required(),
        FormField::text("time", "Time").placeholder("14:30"),
        FormField::new("status", "Status", FieldKind::Select).options([
            ("scheduled", "Scheduled"),
            ("completed", "Completed"),
            ("cancelled", "Cancelled"),
        ]),
        FormField::new("notes", "Notes", FieldKind::Textarea),
    ];

    rsx! {
        CrudManager {
            title: "Appointments",
            api,
            columns,
            form_fields: fields,
            empty_message: "You don't have any scheduled appointments.",
        }
    }
}

#[component]
pub fn AgentDocumentsPage() -> Element {
    let api = use_resource_api(resource::AGENT_DOCUMENTS);
    let columns = vec![
        Column::new("name", "Name"),
        Column::new("type", "Type").badge(),
        Column::new("created_at", "Uploaded").date(),
    ];
    let fields = vec![
        FormField::text("name", "Name").required(),
        FormField::new("type", "Type", FieldKind::Select).options([
            ("contract", "Contract"),
            ("id", "ID Document"),
            ("brochure", "Brochure"),
            ("other", "Other"),
        ]),
        FormField::new("file", "File", FieldKind::File)
            .required()
            .accept(".pdf,.doc,.docx,image/*"),
    ];

    rsx! {
        CrudManager {
            title: "Documents",
            api,
            columns,
            form_fields: fields,
            empty_message: "No documents uploaded yet.",
        }
    }
}
