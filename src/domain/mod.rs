pub mod about;
pub mod document;
pub mod exposition;
pub mod image;
pub mod texte;
pub mod travaux;
pub mod user;

pub use about::{
    About, AboutDetail, NewSectionAbout, SectionAbout, SectionAboutDetail, SectionAboutKind,
    SectionAboutUpdate,
};
pub use exposition::{Exposition, ExpositionDetail, ExpositionUpdate, NewExposition};
pub use image::{Image, ImageOwner, ImageOwnerPatch, ImageUpdate, StoredFile};
pub use texte::{NewTexte, Texte, TexteUpdate};
pub use travaux::{
    NewSectionTravaux, NewTravaux, SectionTravaux, SectionTravauxDetail, SectionTravauxUpdate,
    Travaux, TravauxDetail, TravauxUpdate,
};
pub use user::{NewUser, Role, User, UserUpdate};
