/*!
 * Authentication services
 *
 * Responsibility:
 * - token_codec: 署名付きアクセストークンの発行と検証
 * - password: パスワードハッシュ比較 (argon2)
 * - login: 資格情報検証 → トークン発行のオーケストレーション
 * - policy: ルート単位の認可テーブル (first match wins)
 */
pub mod login;
pub mod password;
pub mod policy;
pub mod token_codec;
