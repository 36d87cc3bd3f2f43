//! Stockage local des images.
//!
//! Les fichiers sont écrits dans un répertoire local (`public/images` par
//! défaut) servi tel quel sur une route statique. Les URLs publiques sont
//! réécrites en absolu à partir de la base configurée, pour que le front en
//! développement local reçoive des liens exploitables.

use std::path::{Path, PathBuf};

use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::image::StoredFile;
use crate::infrastructure::config::StorageConfig;
use crate::infrastructure::error::{AppError, AppResult};

/// Types d'image acceptés à l'upload (mêmes formats que le champ image du
/// back-office d'origine)
const ACCEPTED_EXTENSIONS: [&str; 4] = ["jpg", "png", "gif", "webp"];

/// Service de stockage des images sur le système de fichiers
#[derive(Debug, Clone)]
pub struct ImageStorage {
    root: PathBuf,
    route: String,
    base_url: String,
}

impl ImageStorage {
    /// Prépare le répertoire de stockage
    pub fn new(config: &StorageConfig) -> AppResult<Self> {
        let root = PathBuf::from(&config.path);
        std::fs::create_dir_all(&root)?;

        info!(path = %root.display(), "Répertoire de stockage prêt");

        Ok(Self {
            root,
            route: config.route.trim_end_matches('/').to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Détecte le type d'image à partir des octets du fichier.
    ///
    /// Le nom de fichier fourni par le client n'est pas une source fiable:
    /// seuls les octets magiques font foi.
    pub fn sniff_image(content: &[u8]) -> AppResult<(&'static str, &'static str)> {
        let kind = infer::get(content).ok_or_else(|| {
            AppError::UnsupportedMediaType("type de fichier non reconnu".to_string())
        })?;

        let extension = kind.extension();
        if !ACCEPTED_EXTENSIONS.contains(&extension) {
            return Err(AppError::UnsupportedMediaType(kind.mime_type().to_string()));
        }

        Ok((extension, kind.mime_type()))
    }

    /// Écrit le contenu sous un nom généré et retourne les métadonnées
    pub async fn save(&self, content: &[u8]) -> AppResult<StoredFile> {
        let (extension, mime_type) = Self::sniff_image(content)?;

        let filename = format!("{}.{}", Uuid::new_v4(), extension);
        let path = self.root.join(&filename);

        tokio::fs::write(&path, content).await?;
        info!(filename = %filename, size = content.len(), "Image enregistrée");

        Ok(StoredFile {
            filename,
            extension: extension.to_string(),
            mime_type: mime_type.to_string(),
            filesize: content.len() as i64,
        })
    }

    /// Efface le fichier d'une image supprimée. Un fichier déjà absent est
    /// signalé dans les logs mais ne fait pas échouer la suppression.
    pub async fn delete(&self, filename: &str) {
        let path = self.root.join(filename);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            warn!(filename = %filename, error = %e, "Fichier introuvable à la suppression");
        }
    }

    /// URL publique absolue d'un fichier stocké
    pub fn public_url(&self, filename: &str) -> String {
        format!("{}{}/{}", self.base_url, self.route, filename)
    }

    /// Répertoire servi par la route statique
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Route HTTP sous laquelle les fichiers sont exposés
    pub fn route(&self) -> &str {
        &self.route
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_storage(dir: &Path) -> ImageStorage {
        ImageStorage::new(&StorageConfig {
            path: dir.to_string_lossy().into_owned(),
            route: "/images".to_string(),
            base_url: "http://localhost:3000".to_string(),
        })
        .unwrap()
    }

    // En-tête PNG minimal valide pour la détection de type
    const PNG_HEADER: [u8; 16] = [
        0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D',
        b'R',
    ];

    #[test]
    fn sniffs_png_from_magic_bytes() {
        let (extension, mime) = ImageStorage::sniff_image(&PNG_HEADER).unwrap();
        assert_eq!(extension, "png");
        assert_eq!(mime, "image/png");
    }

    #[test]
    fn rejects_non_image_content() {
        let result = ImageStorage::sniff_image(b"%PDF-1.4 pas une image");
        assert!(matches!(result, Err(AppError::UnsupportedMediaType(_))));

        let result = ImageStorage::sniff_image(b"du texte brut");
        assert!(matches!(result, Err(AppError::UnsupportedMediaType(_))));
    }

    #[tokio::test]
    async fn save_writes_file_and_delete_removes_it() {
        let dir = tempfile::tempdir().unwrap();
        let storage = test_storage(dir.path());

        let stored = storage.save(&PNG_HEADER).await.unwrap();
        assert_eq!(stored.extension, "png");
        assert_eq!(stored.filesize, PNG_HEADER.len() as i64);
        assert!(dir.path().join(&stored.filename).exists());

        storage.delete(&stored.filename).await;
        assert!(!dir.path().join(&stored.filename).exists());
    }

    #[test]
    fn public_urls_are_absolute() {
        let dir = tempfile::tempdir().unwrap();
        let storage = test_storage(dir.path());

        assert_eq!(
            storage.public_url("abc.png"),
            "http://localhost:3000/images/abc.png"
        );
    }
}
